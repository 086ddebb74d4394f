//! # Domain Catcher Shared
//!
//! Common types and interfaces used across all Domain Catcher crates.

pub mod config;
pub mod domains;
pub mod error;
pub mod model;

// Re-exports
pub use config::*;
pub use domains::*;
pub use error::*;
pub use model::*;

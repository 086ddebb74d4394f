//! Domain Catcher CLI library
//!
//! Commands, console presentation and signal handling for the
//! `domain-catcher` binary.

pub mod commands;
pub mod console_sink;
pub mod shutdown;

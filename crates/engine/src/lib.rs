//! # Domain Catcher Engine
//!
//! The polling/acquisition control loop: one [`AcquisitionEngine`] cycle
//! walks the watched domains, and [`ScanScheduler`] repeats cycles at a
//! fixed interval until shutdown.

mod acquisition;
mod scheduler;

pub use acquisition::{AcquisitionEngine, CycleReport};
pub use scheduler::{ScanScheduler, SchedulerReport};
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
pub(crate) mod testing;

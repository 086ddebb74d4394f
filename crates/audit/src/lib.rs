//! # Domain Catcher Audit
//!
//! Append-only audit trail for domain probe and registration outcomes.

mod event;
mod file_sink;
mod memory_sink;
mod sink;

pub use event::{AuditEvent, AuditStatus};
pub use file_sink::FileAuditSink;
pub use memory_sink::{AuditStats, MemoryAuditSink};
pub use sink::{AuditSink, FanoutSink};

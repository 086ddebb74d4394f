//! AuditSink - Where audit events go

use crate::event::AuditEvent;
use async_trait::async_trait;
use std::sync::Arc;

/// Append-only event recorder
///
/// Recording is best-effort: implementations absorb their own failures so
/// that a broken sink never interrupts a scan.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, event: AuditEvent);
}

/// Forwards every event to each inner sink, in order
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink
    pub fn with_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

#[async_trait]
impl AuditSink for FanoutSink {
    async fn record(&self, event: AuditEvent) {
        for sink in &self.sinks {
            sink.record(event.clone()).await;
        }
    }
}

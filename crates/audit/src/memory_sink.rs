//! MemoryAuditSink - Bounded in-memory audit trail

use crate::event::{AuditEvent, AuditStatus};
use crate::sink::AuditSink;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// In-memory audit sink keeping the most recent events
#[derive(Debug)]
pub struct MemoryAuditSink {
    entries: Mutex<VecDeque<AuditEvent>>,
    max_entries: usize,
}

impl MemoryAuditSink {
    /// Create a new MemoryAuditSink
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_entries.min(1024))),
            max_entries: max_entries.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<AuditEvent>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append an event, evicting the oldest when full
    pub fn push(&self, event: AuditEvent) {
        let mut entries = self.lock();
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(event);
    }

    /// All retained events, oldest first
    pub fn events(&self) -> Vec<AuditEvent> {
        self.lock().iter().cloned().collect()
    }

    /// Retained events for one domain, oldest first
    pub fn for_domain(&self, domain: &str) -> Vec<AuditEvent> {
        self.lock()
            .iter()
            .filter(|e| e.domain == domain)
            .cloned()
            .collect()
    }

    /// Get statistics
    pub fn stats(&self) -> AuditStats {
        let entries = self.lock();
        let count = |status: AuditStatus| entries.iter().filter(|e| e.status == status).count();

        AuditStats {
            total_entries: entries.len(),
            free: count(AuditStatus::Free),
            registered: count(AuditStatus::Registered),
            registration_failed: count(AuditStatus::RegistrationFailed),
            unavailable: count(AuditStatus::Unavailable),
        }
    }
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, event: AuditEvent) {
        self.push(event);
    }
}

/// Audit statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditStats {
    pub total_entries: usize,
    pub free: usize,
    pub registered: usize,
    pub registration_failed: usize,
    pub unavailable: usize,
}

//! AcquisitionEngine - One scan over the watched domains
//!
//! For every watched domain, in list order:
//! 1. Skip it if it was already claimed during this run
//! 2. Probe availability through the gateway
//! 3. If free, register it and remember the claim on success
//! 4. Record an audit event for each outcome
//!
//! Domains are processed strictly one at a time. Registration is billable
//! and cannot be undone, so a domain is never registered again once a
//! claim succeeded.

use audit::{AuditEvent, AuditSink};
use gateway::RegistrarGateway;
use shared::{DomainSource, RegistrationOutcome};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Counters for one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Entries in the domain list, duplicates included
    pub watched: usize,
    /// Entries skipped because they were already claimed
    pub skipped: usize,
    pub free: usize,
    pub registered: usize,
    pub failed: usize,
    pub unavailable: usize,
    /// Shutdown was requested before every entry was processed
    pub interrupted: bool,
}

/// The acquisition state machine
pub struct AcquisitionEngine {
    gateway: Arc<dyn RegistrarGateway>,
    audit: Arc<dyn AuditSink>,
    source: DomainSource,
    claimed: HashSet<String>,
}

impl AcquisitionEngine {
    /// Create a new AcquisitionEngine
    pub fn new(
        gateway: Arc<dyn RegistrarGateway>,
        audit: Arc<dyn AuditSink>,
        source: DomainSource,
    ) -> Self {
        Self {
            gateway,
            audit,
            source,
            claimed: HashSet::new(),
        }
    }

    /// Whether a domain was registered during this run
    pub fn is_claimed(&self, domain: &str) -> bool {
        self.claimed.contains(domain)
    }

    /// Domains registered during this run, sorted
    pub fn claimed(&self) -> Vec<String> {
        let mut claimed: Vec<String> = self.claimed.iter().cloned().collect();
        claimed.sort();
        claimed
    }

    /// Run one full cycle
    ///
    /// The domain list is loaded fresh; a load failure aborts this cycle
    /// only. Shutdown is honored between domains, never during a call.
    pub async fn run_cycle(&mut self, shutdown: &CancellationToken) -> shared::Result<CycleReport> {
        let domains = self.source.load()?;
        let mut report = CycleReport {
            watched: domains.len(),
            ..Default::default()
        };

        debug!(count = domains.len(), source = %self.source.describe(), "loaded watched domains");

        for domain in &domains {
            if shutdown.is_cancelled() {
                info!("shutdown requested, stopping cycle early");
                report.interrupted = true;
                break;
            }

            self.process(domain, &mut report).await;
        }

        Ok(report)
    }

    async fn process(&mut self, domain: &str, report: &mut CycleReport) {
        if self.is_claimed(domain) {
            trace!(domain, "already registered in this session, skipping");
            report.skipped += 1;
            return;
        }

        let verdict = self.gateway.check_availability(domain).await;
        if !verdict.is_free() {
            debug!(domain, "not available for registration");
            report.unavailable += 1;
            self.audit.record(AuditEvent::unavailable(domain)).await;
            return;
        }

        info!(domain, "domain is available, attempting to register");
        report.free += 1;
        self.audit.record(AuditEvent::free(domain)).await;

        match self.gateway.register(domain).await {
            RegistrationOutcome::Success { data } => {
                info!(domain, response = ?data, "domain registered");
                report.registered += 1;
                self.audit.record(AuditEvent::registered(domain)).await;
                self.claimed.insert(domain.to_string());
            }
            RegistrationOutcome::Failure { reason } => {
                warn!(domain, reason = %reason, "registration failed");
                report.failed += 1;
                self.audit
                    .record(AuditEvent::registration_failed(domain, &reason))
                    .await;
            }
        }
    }
}

//! Scripted registry used by engine and scheduler tests

use crate::AcquisitionEngine;
use async_trait::async_trait;
use audit::MemoryAuditSink;
use gateway::{RegistrarGateway, SessionToken};
use shared::{AuthError, DomainSource, RegistrationOutcome, Verdict};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Registry double: domains marked free stay free, registrations pop
/// scripted outcomes per domain.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    free: HashSet<String>,
    outcomes: Mutex<HashMap<String, VecDeque<RegistrationOutcome>>>,
    probes: Mutex<Vec<String>>,
    registrations: Mutex<Vec<String>>,
    cancel_on_probe: Option<(usize, CancellationToken)>,
    panic_on_probe: Option<usize>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn free(mut self, domain: &str) -> Self {
        self.free.insert(domain.to_string());
        self
    }

    pub(crate) fn succeeds(self, domain: &str) -> Self {
        self.script(domain, RegistrationOutcome::Success { data: None })
    }

    pub(crate) fn fails(self, domain: &str, reason: &str) -> Self {
        self.script(domain, RegistrationOutcome::failure(reason))
    }

    /// Cancel `token` while the n-th probe (1-based) is in flight
    pub(crate) fn cancel_on_probe(mut self, n: usize, token: CancellationToken) -> Self {
        self.cancel_on_probe = Some((n, token));
        self
    }

    /// Panic during the n-th probe (1-based)
    pub(crate) fn panic_on_probe(mut self, n: usize) -> Self {
        self.panic_on_probe = Some(n);
        self
    }

    fn script(mut self, domain: &str, outcome: RegistrationOutcome) -> Self {
        self.outcomes
            .get_mut()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    pub(crate) fn probes(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }

    pub(crate) fn registrations(&self) -> Vec<String> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrarGateway for ScriptedGateway {
    async fn authenticate(&self) -> Result<SessionToken, AuthError> {
        Ok(SessionToken::new("test-token"))
    }

    async fn check_availability(&self, domain: &str) -> Verdict {
        let count = {
            let mut probes = self.probes.lock().unwrap();
            probes.push(domain.to_string());
            probes.len()
        };

        if let Some((n, token)) = &self.cancel_on_probe {
            if count == *n {
                token.cancel();
            }
        }

        if self.panic_on_probe == Some(count) {
            panic!("scripted panic while probing {}", domain);
        }

        if self.free.contains(domain) {
            Verdict::Free
        } else {
            Verdict::Unavailable
        }
    }

    async fn register(&self, domain: &str) -> RegistrationOutcome {
        self.registrations.lock().unwrap().push(domain.to_string());

        self.outcomes
            .lock()
            .unwrap()
            .get_mut(domain)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| RegistrationOutcome::failure("unscripted registration"))
    }
}

pub(crate) fn engine_with(
    gateway: Arc<ScriptedGateway>,
    sink: Arc<MemoryAuditSink>,
    domains: &[&str],
) -> AcquisitionEngine {
    AcquisitionEngine::new(
        gateway,
        sink,
        DomainSource::Inline(domains.iter().map(|d| d.to_string()).collect()),
    )
}

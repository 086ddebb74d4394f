//! RegistrarGateway - Port to the domain registry

use crate::session::SessionToken;
use async_trait::async_trait;
use shared::{AuthError, RegistrationOutcome, Verdict};

/// Operations the acquisition engine needs from a registry
///
/// Only `authenticate` reports errors. Probe and registration failures come
/// back as data so that a scan never aborts on a single domain.
#[async_trait]
pub trait RegistrarGateway: Send + Sync {
    /// Validate the configured credential and keep it for later calls
    ///
    /// Re-validates even when a token is already held. A failure leaves the
    /// previously held token in place.
    async fn authenticate(&self) -> Result<SessionToken, AuthError>;

    /// Probe a domain. Anything other than a confirmed "free" is `Unavailable`.
    async fn check_availability(&self, domain: &str) -> Verdict;

    /// Re-check availability, then submit a registration order
    async fn register(&self, domain: &str) -> RegistrationOutcome;
}

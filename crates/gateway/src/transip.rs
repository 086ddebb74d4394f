//! TransipGateway - TransIP REST API (v6) client

use crate::registrar::RegistrarGateway;
use crate::session::{Session, SessionToken};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use shared::{AuthError, CatcherConfig, CatcherError, RegistrationOutcome, Verdict};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// HTTP settings for the gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: shared::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(shared::DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: concat!("domain-catcher/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl From<&CatcherConfig> for GatewayConfig {
    fn from(config: &CatcherConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            timeout: config.request_timeout,
            ..Default::default()
        }
    }
}

/// Body of `POST /domains`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRequest<'a> {
    domain_name: &'a str,
    registration_period: u32,
    auth_code: &'a str,
    is_transfer_locked: bool,
}

impl<'a> RegistrationRequest<'a> {
    fn new(domain_name: &'a str) -> Self {
        Self {
            domain_name,
            registration_period: 1,
            auth_code: "",
            is_transfer_locked: false,
        }
    }
}

/// Registry gateway backed by the TransIP API
pub struct TransipGateway {
    client: reqwest::Client,
    config: GatewayConfig,
    session: Arc<Session>,
}

impl TransipGateway {
    /// Create a new TransipGateway
    pub fn new(session: Arc<Session>, config: GatewayConfig) -> shared::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| CatcherError::Http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Call the authenticated test endpoint and return its status code
    ///
    /// Authenticates first if no token is held yet.
    pub async fn api_test(&self) -> Result<u16, AuthError> {
        let token = self.session_token().await?;
        self.probe(&token).await
    }

    /// Endpoint under the base URL, one percent-encoded path segment each
    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| format!("invalid API URL {}: {}", self.config.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| format!("invalid API URL {}", self.config.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder, token: &SessionToken) -> RequestBuilder {
        builder
            .bearer_auth(token.as_str())
            .header(CONTENT_TYPE, "application/json")
    }

    async fn probe(&self, token: &SessionToken) -> Result<u16, AuthError> {
        let url = self.endpoint(&["api-test"]).map_err(AuthError::Transport)?;
        let request = self.authorized(self.client.get(url), token);
        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(status.as_u16());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AuthError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    // Held token, or a fresh authentication if none is held yet.
    async fn session_token(&self) -> Result<SessionToken, AuthError> {
        match self.session.token().await {
            Some(token) => Ok(token),
            None => self.authenticate().await,
        }
    }

    async fn submit_registration(&self, domain: &str) -> RegistrationOutcome {
        let token = match self.session_token().await {
            Ok(token) => token,
            Err(e) => return RegistrationOutcome::failure(e.to_string()),
        };

        let url = match self.endpoint(&["domains"]) {
            Ok(url) => url,
            Err(e) => return RegistrationOutcome::failure(e),
        };
        let request = self
            .authorized(self.client.post(url), &token)
            .json(&RegistrationRequest::new(domain));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "registration request failed");
                return RegistrationOutcome::failure(e.to_string());
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            info!(%status, "registration accepted");
            let data = serde_json::from_str::<Value>(&body).ok();
            return RegistrationOutcome::Success { data };
        }

        warn!(%status, "registration rejected");
        RegistrationOutcome::failure(error_detail(status, &body))
    }
}

#[async_trait]
impl RegistrarGateway for TransipGateway {
    #[instrument(skip(self))]
    async fn authenticate(&self) -> Result<SessionToken, AuthError> {
        let credential = self
            .session
            .credential()
            .cloned()
            .ok_or(AuthError::MissingCredential)?;

        match self.probe(&credential).await {
            Ok(_) => {
                self.session.store(credential.clone()).await;
                info!("authenticated with registrar API");
                Ok(credential)
            }
            Err(e) => {
                warn!(error = %e, "authentication failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn check_availability(&self, domain: &str) -> Verdict {
        let token = match self.session_token().await {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "no session, treating as unavailable");
                return Verdict::Unavailable;
            }
        };

        let url = match self.endpoint(&["domain-availability", domain]) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "could not build availability URL");
                return Verdict::Unavailable;
            }
        };
        let request = self.authorized(self.client.get(url), &token);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "availability request failed");
                return Verdict::Unavailable;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "availability request returned error status");
            return Verdict::Unavailable;
        }

        match response.json::<Value>().await {
            Ok(body) => parse_verdict(&body),
            Err(e) => {
                debug!(error = %e, "availability response was not JSON");
                Verdict::Unavailable
            }
        }
    }

    #[instrument(skip(self))]
    async fn register(&self, domain: &str) -> RegistrationOutcome {
        if !self.check_availability(domain).await.is_free() {
            return RegistrationOutcome::failure(format!(
                "Domain {} is not available for registration",
                domain
            ));
        }

        self.submit_registration(domain).await
    }
}

/// Interpret an availability response body
///
/// The API reports `availability.status`; some responses carry a top-level
/// `status` instead. Only the exact value `"free"` counts.
pub fn parse_verdict(body: &Value) -> Verdict {
    let nested = body.pointer("/availability/status").and_then(Value::as_str);
    let top_level = body.get("status").and_then(Value::as_str);

    if nested == Some("free") || top_level == Some("free") {
        Verdict::Free
    } else {
        Verdict::Unavailable
    }
}

fn error_detail(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("request failed with status code {}", status.as_u16());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => message,
        Ok(json) if json.is_object() || json.is_array() => json.to_string(),
        _ => body.to_string(),
    }
}

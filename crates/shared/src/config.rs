//! Configuration types for Domain Catcher

use crate::domains::DomainSource;
use crate::error::{CatcherError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.transip.nl/v6";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_DOMAINS_FILE: &str = "config/domains.json";
pub const DEFAULT_LOG_DIR: &str = "logs";

pub const ENV_ACCESS_TOKEN: &str = "TRANSIP_ACCESS_TOKEN";
pub const ENV_API_URL: &str = "TRANSIP_API_URL";
pub const ENV_CHECK_INTERVAL: &str = "CHECK_INTERVAL_SECONDS";
pub const ENV_REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT_SECONDS";
pub const ENV_DOMAINS: &str = "DOMAINS";
pub const ENV_DOMAINS_FILE: &str = "DOMAINS_FILE";
pub const ENV_LOG_DIR: &str = "LOG_DIR";

/// Runtime configuration for the catcher
#[derive(Clone)]
pub struct CatcherConfig {
    /// Registrar API base URL
    pub api_url: String,

    /// Bearer token for the registrar API
    pub access_token: Option<String>,

    /// Pause between the end of one scan and the start of the next
    pub check_interval: Duration,

    /// Upper bound for a single HTTP call
    pub request_timeout: Duration,

    /// Watched domain list source
    pub domains: DomainSource,

    /// Directory for daily audit log files
    pub log_dir: PathBuf,
}

impl Default for CatcherConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            domains: DomainSource::EnvOrFile {
                var: ENV_DOMAINS.to_string(),
                file: PathBuf::from(DEFAULT_DOMAINS_FILE),
            },
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl std::fmt::Debug for CatcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatcherConfig")
            .field("api_url", &self.api_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("check_interval", &self.check_interval)
            .field("request_timeout", &self.request_timeout)
            .field("domains", &self.domains)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl CatcherConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a custom lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup(ENV_API_URL)) {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        config.access_token = non_empty(lookup(ENV_ACCESS_TOKEN));

        if let Some(raw) = non_empty(lookup(ENV_CHECK_INTERVAL)) {
            config.check_interval = parse_seconds(ENV_CHECK_INTERVAL, &raw)?;
        }

        if let Some(raw) = non_empty(lookup(ENV_REQUEST_TIMEOUT)) {
            config.request_timeout = parse_seconds(ENV_REQUEST_TIMEOUT, &raw)?;
        }

        if let Some(file) = non_empty(lookup(ENV_DOMAINS_FILE)) {
            config.domains = DomainSource::EnvOrFile {
                var: ENV_DOMAINS.to_string(),
                file: PathBuf::from(file),
            };
        }

        if let Some(dir) = non_empty(lookup(ENV_LOG_DIR)) {
            config.log_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

/// Parse a positive whole number of seconds
pub fn parse_seconds(name: &str, raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        CatcherError::Config(format!("{} must be a whole number of seconds, got '{}'", name, raw))
    })?;

    if secs == 0 {
        return Err(CatcherError::Config(format!("{} must be greater than zero", name)));
    }

    Ok(Duration::from_secs(secs))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

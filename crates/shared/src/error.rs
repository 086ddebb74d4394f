//! Error types for Domain Catcher

use thiserror::Error;

/// Error thrown when the watched domain list cannot be loaded
#[derive(Debug, Error)]
#[error("Could not load domain list from {source_name}: {reason}")]
pub struct DomainListError {
    pub source_name: String,
    pub reason: String,
}

/// Errors raised while establishing an API session
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No access token configured (set TRANSIP_ACCESS_TOKEN)")]
    MissingCredential,

    #[error("API rejected the access token with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Could not reach the registrar API: {0}")]
    Transport(String),
}

impl AuthError {
    /// HTTP status returned by the API, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// General Domain Catcher error type
#[derive(Debug, Error)]
pub enum CatcherError {
    #[error(transparent)]
    DomainList(#[from] DomainListError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, CatcherError>;

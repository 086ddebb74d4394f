//! Probe and registration results exchanged between the gateway and the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of probing one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Free,
    Unavailable,
}

impl Verdict {
    pub fn is_free(self) -> bool {
        matches!(self, Self::Free)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("free"),
            Self::Unavailable => f.write_str("unavailable"),
        }
    }
}

/// Result of an attempted claim
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    /// The registry accepted the order. `data` is the response body, if any.
    Success { data: Option<serde_json::Value> },
    /// The registry refused the order or could not be reached.
    Failure { reason: String },
}

impl RegistrationOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            reason: reason.into(),
        }
    }

    /// Failure reason, `None` on success
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason } => Some(reason),
        }
    }
}

//! Audit event types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status code attached to an audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Free,
    Registered,
    RegistrationFailed,
    Unavailable,
}

impl AuditStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Registered => "REGISTERED",
            Self::RegistrationFailed => "REGISTRATION_FAILED",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One domain's status at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub domain: String,
    pub status: AuditStatus,
    pub message: String,
}

impl AuditEvent {
    /// Create an event stamped with the current time
    pub fn new(domain: impl Into<String>, status: AuditStatus, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            domain: domain.into(),
            status,
            message: message.into(),
        }
    }

    pub fn free(domain: &str) -> Self {
        Self::new(domain, AuditStatus::Free, "Domain is available for registration")
    }

    pub fn registered(domain: &str) -> Self {
        Self::new(domain, AuditStatus::Registered, "Domain registration successful")
    }

    pub fn registration_failed(domain: &str, reason: &str) -> Self {
        Self::new(domain, AuditStatus::RegistrationFailed, reason)
    }

    pub fn unavailable(domain: &str) -> Self {
        Self::new(domain, AuditStatus::Unavailable, "Domain not available for registration")
    }

    /// Render as a single log line (without trailing newline)
    pub fn to_line(&self) -> String {
        format!(
            "{} - Domain: {} - Status: {} - {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.domain,
            self.status,
            single_line(&self.message),
        )
    }
}

// Keeps one event per line even when an API error body spans several lines.
fn single_line(message: &str) -> String {
    message.lines().map(str::trim).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_event(status: AuditStatus, message: &str) -> AuditEvent {
        AuditEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap(),
            domain: "example.nl".to_string(),
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_line_format() {
        let event = fixed_event(AuditStatus::Free, "Domain is available for registration");

        assert_eq!(
            event.to_line(),
            "2024-03-01T12:30:05.000Z - Domain: example.nl - Status: FREE - Domain is available for registration"
        );
    }

    #[test]
    fn test_multiline_message_is_flattened() {
        let event = fixed_event(AuditStatus::RegistrationFailed, "quota\n  exceeded");
        assert!(event.to_line().ends_with("Status: REGISTRATION_FAILED - quota exceeded"));
    }

    #[test]
    fn test_constructors() {
        assert_eq!(AuditEvent::free("a.nl").status, AuditStatus::Free);
        assert_eq!(AuditEvent::registered("a.nl").status, AuditStatus::Registered);
        assert_eq!(AuditEvent::unavailable("a.nl").status, AuditStatus::Unavailable);

        let failed = AuditEvent::registration_failed("a.nl", "quota exceeded");
        assert_eq!(failed.status, AuditStatus::RegistrationFailed);
        assert_eq!(failed.message, "quota exceeded");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AuditStatus::RegistrationFailed).unwrap();
        assert_eq!(json, "\"REGISTRATION_FAILED\"");
    }
}

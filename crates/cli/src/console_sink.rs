//! ConsoleAuditSink - Colored operator output for audit events

use async_trait::async_trait;
use audit::{AuditEvent, AuditSink, AuditStatus};
use console::{style, Term};

/// Prints each audit event as one colored line
#[derive(Debug, Clone, Default)]
pub struct ConsoleAuditSink;

impl ConsoleAuditSink {
    pub fn new() -> Self {
        Self
    }
}

/// Human-readable line for an event
pub fn render(event: &AuditEvent) -> String {
    let time = style(format!("[{}]", event.timestamp.format("%H:%M:%S"))).dim();
    let domain = style(&event.domain).bold();

    let text = match event.status {
        AuditStatus::Free => style(format!(
            "🎯 Domain {} is available! Attempting to register...",
            domain
        ))
        .cyan(),
        AuditStatus::Registered => style(format!("🎉 Successfully registered {}!", domain)).green(),
        AuditStatus::RegistrationFailed => {
            style(format!("❌ Failed to register {}: {}", domain, event.message)).red()
        }
        AuditStatus::Unavailable => {
            style(format!("ℹ️  {} is not available for registration", domain)).yellow()
        }
    };

    format!("{} {}", time, text)
}

#[async_trait]
impl AuditSink for ConsoleAuditSink {
    async fn record(&self, event: AuditEvent) {
        let line = render(&event);
        let term = match event.status {
            AuditStatus::RegistrationFailed => Term::stderr(),
            _ => Term::stdout(),
        };
        if let Err(e) = term.write_line(&line) {
            tracing::debug!(error = %e, "failed to write to console");
        }
    }
}

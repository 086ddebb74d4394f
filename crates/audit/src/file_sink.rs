//! FileAuditSink - Daily append-only log files

use crate::event::AuditEvent;
use crate::sink::AuditSink;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const FILE_PREFIX: &str = "domain-catcher";

/// Appends one line per event to `<dir>/domain-catcher-YYYY-MM-DD.log`
///
/// The day is taken from the event's UTC timestamp.
#[derive(Debug)]
pub struct FileAuditSink {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAuditSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Log file for a given day
    pub fn path_for(&self, day: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}-{}.log", FILE_PREFIX, day.format("%Y-%m-%d")))
    }

    async fn append(&self, event: &AuditEvent) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(event.timestamp.date_naive());
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        let mut line = event.to_line();
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

#[async_trait]
impl AuditSink for FileAuditSink {
    async fn record(&self, event: AuditEvent) {
        if let Err(e) = self.append(&event).await {
            tracing::warn!(
                dir = %self.dir.display(),
                domain = %event.domain,
                error = %e,
                "failed to write audit event"
            );
        }
    }
}

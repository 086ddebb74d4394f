//! ScanScheduler - Repeats acquisition cycles until shutdown

use crate::acquisition::AcquisitionEngine;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Totals for a scheduler run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    /// Domains registered during the run, sorted
    pub claimed: Vec<String>,
}

/// Drives the engine on a fixed interval
///
/// The interval runs from the end of one cycle to the start of the next, so
/// a slow cycle delays the following one instead of overlapping it.
pub struct ScanScheduler {
    engine: Arc<Mutex<AcquisitionEngine>>,
    interval: Duration,
}

impl ScanScheduler {
    pub fn new(engine: AcquisitionEngine, interval: Duration) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            interval,
        }
    }

    /// Run cycles until `shutdown` is cancelled
    ///
    /// A failed or panicked cycle is logged and the next one is scheduled as
    /// usual. Claims made before a panic are kept.
    pub async fn run(self, shutdown: CancellationToken) -> SchedulerReport {
        let mut report = SchedulerReport::default();

        while !shutdown.is_cancelled() {
            let started = Instant::now();
            info!("starting domain checks");

            let engine = self.engine.clone();
            let token = shutdown.clone();
            let cycle = tokio::spawn(async move { engine.lock().await.run_cycle(&token).await });

            match cycle.await {
                Ok(Ok(cycle)) => {
                    report.cycles_completed += 1;
                    info!(
                        watched = cycle.watched,
                        free = cycle.free,
                        registered = cycle.registered,
                        failed = cycle.failed,
                        unavailable = cycle.unavailable,
                        skipped = cycle.skipped,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "finished checking all domains"
                    );
                }
                Ok(Err(e)) => {
                    report.cycles_failed += 1;
                    error!(error = %e, "error checking domains");
                }
                Err(e) => {
                    report.cycles_failed += 1;
                    error!(error = %e, "domain check aborted");
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("scheduler cancelled");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        report.claimed = self.engine.lock().await.claimed();
        report
    }
}

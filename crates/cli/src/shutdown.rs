//! Process signal handling

use anyhow::{Context, Result};
use engine::CancellationToken;
use tokio::signal;
use tracing::{error, info};

/// Waits for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() -> Result<&'static str> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res?;
            Ok("shutdown")
        },
        res = terminate => {
            res?;
            Ok("termination")
        },
    }
}

/// Cancel `token` when the process is asked to stop
///
/// In-flight API calls are left to finish; the scheduler only stops taking
/// new work.
pub fn cancel_on_signal(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match shutdown_signal().await {
            Ok(kind) => {
                info!("Received {} signal, stopping...", kind);
                token.cancel();
            }
            Err(e) => error!("Error while waiting for shutdown signal: {e}"),
        }
    })
}

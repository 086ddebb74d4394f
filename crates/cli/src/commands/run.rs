//! domain-catcher run command

use crate::console_sink::ConsoleAuditSink;
use crate::shutdown::cancel_on_signal;
use audit::{FanoutSink, FileAuditSink, MemoryAuditSink};
use clap::Args;
use console::style;
use engine::{AcquisitionEngine, CancellationToken, ScanScheduler, SchedulerReport};
use gateway::{GatewayConfig, RegistrarGateway, Session, TransipGateway};
use shared::{parse_domain_list, AuthError, CatcherConfig, DomainSource};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default, Args)]
pub struct RunCommand {
    /// Seconds between the end of one scan and the start of the next
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Comma-separated domains to watch (overrides DOMAINS and the domains file)
    #[arg(long)]
    pub domains: Option<String>,

    /// JSON file with the domains to watch
    #[arg(long)]
    pub domains_file: Option<PathBuf>,

    /// Directory for the daily audit logs
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Registrar API base URL
    #[arg(long)]
    pub api_url: Option<String>,
}

impl RunCommand {
    /// Apply command-line overrides on top of the environment configuration
    pub fn apply(&self, mut config: CatcherConfig) -> CatcherConfig {
        if let Some(secs) = self.interval {
            config.check_interval = Duration::from_secs(secs);
        }

        if let Some(raw) = &self.domains {
            config.domains = DomainSource::Inline(parse_domain_list(raw));
        } else if let Some(file) = &self.domains_file {
            config.domains = DomainSource::File(file.clone());
        }

        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }

        if let Some(url) = &self.api_url {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        config
    }

    pub async fn run(&self) -> anyhow::Result<ExitCode> {
        let config = self.apply(CatcherConfig::from_env()?);

        // Signals are handled from before the first API call on.
        let shutdown = CancellationToken::new();
        cancel_on_signal(shutdown.clone());

        let outcome = execute(config, shutdown).await?;
        Ok(outcome.exit_code())
    }
}

/// How a `run` ended
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The startup authentication failed; no scan was started
    AuthenticationFailed,
    /// Shutdown was requested before scanning began
    Interrupted,
    /// The scheduler ran until shutdown
    Stopped(SchedulerReport),
}

impl RunOutcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::AuthenticationFailed => ExitCode::FAILURE,
            Self::Interrupted | Self::Stopped(_) => ExitCode::SUCCESS,
        }
    }
}

/// Authenticate, then scan until `shutdown` is cancelled
pub async fn execute(config: CatcherConfig, shutdown: CancellationToken) -> anyhow::Result<RunOutcome> {
    println!();
    println!(
        "{} starting...",
        style(concat!("🚀 Domain Catcher v", env!("CARGO_PKG_VERSION"))).cyan().bold()
    );
    println!(
        "⏱️  Checking domains every {}",
        style(format!("{} seconds", config.check_interval.as_secs())).yellow()
    );

    let session = Arc::new(Session::new(config.access_token.clone()));
    let gateway = Arc::new(TransipGateway::new(session, GatewayConfig::from(&config))?);

    println!();
    println!("{}", style("🔑 Connecting to TransIP API...").yellow());
    tokio::select! {
        _ = shutdown.cancelled() => {
            println!("{}", style("💤 Stopped before monitoring started").bold());
            return Ok(RunOutcome::Interrupted);
        }
        result = gateway.authenticate() => {
            if let Err(e) = result {
                report_auth_failure(&e);
                return Ok(RunOutcome::AuthenticationFailed);
            }
        }
    }
    println!("{}", style("✅ Connected successfully").green());
    println!();

    print_watch_list(&config.domains);

    let history = Arc::new(MemoryAuditSink::default());
    let sink = FanoutSink::new()
        .with_sink(Arc::new(ConsoleAuditSink::new()))
        .with_sink(Arc::new(FileAuditSink::new(&config.log_dir)))
        .with_sink(history.clone());

    let engine = AcquisitionEngine::new(gateway, Arc::new(sink), config.domains.clone());

    println!("{}", style("🔍 Starting domain monitoring...").bold());
    let report = ScanScheduler::new(engine, config.check_interval)
        .run(shutdown)
        .await;

    let stats = history.stats();
    println!();
    println!("{}", style("💤 Stopped").bold());
    println!(
        "   Cycles: {} completed, {} failed",
        report.cycles_completed, report.cycles_failed
    );
    println!(
        "   Events: {} free, {} registered, {} failed, {} unavailable",
        stats.free, stats.registered, stats.registration_failed, stats.unavailable
    );
    for domain in &report.claimed {
        println!("   {} {}", style("✓").green(), domain);
    }

    Ok(RunOutcome::Stopped(report))
}

fn print_watch_list(source: &DomainSource) {
    match source.load() {
        Ok(domains) => {
            println!(
                "{} from {}",
                style(format!("✅ Loaded {} domain(s)", domains.len())).green(),
                source.describe()
            );
            println!("{}", style("📋 Domains to monitor:").blue());
            for domain in &domains {
                println!("  {}", style(format!("→ {}", domain)).yellow());
            }
            println!();
        }
        // Not fatal: every cycle reloads the list.
        Err(e) => eprintln!("{}", style(format!("❌ {}", e)).red()),
    }
}

fn report_auth_failure(error: &AuthError) {
    eprintln!("{}", style("❌ Connection to TransIP failed").red());
    eprintln!("{}", style(format!("Error: {}", error)).red());
    eprintln!();
    eprintln!("{}", style("Please check your credentials in the .env file").bold());
    eprintln!(
        "Tip: Run {} for more details",
        style("domain-catcher check-credentials").yellow()
    );
    eprintln!(
        "{}",
        style("🛑 Stopping: Could not connect to TransIP").red().bold()
    );
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use uptime_guard::{
    decide, CommandRestarter, Decision, DesktopNotifier, EscalationController, GuardConfig,
    GuardError, HostUptime, Thresholds, TokioTicker, UptimeReader,
};

#[derive(Parser)]
#[command(name = "uptime-guard")]
#[command(about = "Remind, then force, a restart on machines that have been up too long")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file overriding the bundled thresholds and restart command
    #[arg(long, env = "UPTIME_GUARD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read uptime and escalate (default)
    Run,
    /// Print uptime and the decision it would lead to, without acting on it
    Check {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct CheckReport {
    uptime_days: u64,
    uptime: String,
    thresholds: Thresholds,
    decision: Decision,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = hardening_common::init_tracing("uptime_guard") {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(cli.config).await,
        Commands::Check { json } => check(cli.config, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, boundary = ?e.boundary(), "uptime guard failed");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(config: Option<PathBuf>) -> Result<(), GuardError> {
    let config = GuardConfig::load(config.as_deref())?;
    let controller = EscalationController::new(
        config,
        HostUptime,
        DesktopNotifier,
        TokioTicker,
        CommandRestarter,
    );
    let report = controller.run().await?;
    tracing::debug!(?report, "run finished");
    Ok(())
}

fn check(config: Option<PathBuf>, json: bool) -> Result<(), GuardError> {
    let config = GuardConfig::load(config.as_deref())?;
    let uptime = HostUptime.read()?;
    let report = CheckReport {
        uptime_days: uptime.days(),
        uptime: uptime.human(),
        thresholds: config.thresholds,
        decision: decide(uptime.days(), &config.thresholds),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => tracing::error!(error = %e, "failed to serialize check report"),
        }
    } else {
        println!("Uptime: {} ({} days)", report.uptime, report.uptime_days);
        println!(
            "Thresholds: warning {} days, critical {} days",
            report.thresholds.warning_days, report.thresholds.critical_days
        );
        println!("Decision: {:?}", report.decision);
    }
    Ok(())
}

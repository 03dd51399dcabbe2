//! extsync - FreeSWITCH to Phonism extension sync
//!
//! Usage:
//!   extsync                       # Reconcile using the default config
//!   extsync -vv                   # Same, with data dumps
//!   extsync --verbosity 2         # Same as -vv
//!   extsync --config ./extsync.toml --format json

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use extsync_core::commands::SyncCommand;
use extsync_core::config::ConfigStore;
use extsync_core::reconcile::{MatchOutcome, ReconcileReport};

#[derive(Parser)]
#[command(name = "extsync")]
#[command(about = "Reconcile FreeSWITCH extensions with Phonism", long_about = None)]
struct Cli {
    /// Output verbosity (-v: actions, -vv: data dumps, -vvv: request URLs)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,

    /// Numeric verbosity level (0-3), overrides -v
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3), conflicts_with = "verbose")]
    verbosity: Option<u8>,

    /// Path to extsync.toml (defaults to $EXTSYNC_CONFIG or /opt/phonism/extsync.toml)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Output format of the run summary
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No summary
    Quiet,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(cli.level()).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(kind = error_kind(&err), "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    fn level(&self) -> u8 {
        self.verbosity.unwrap_or(self.verbose)
    }
}

fn error_kind(err: &anyhow::Error) -> &'static str {
    err.downcast_ref::<extsync_core::Error>()
        .map(extsync_core::Error::kind)
        .unwrap_or("other")
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "extsync_core=info,extsync=info,warn",
        2 => "extsync_core=debug,extsync=debug,warn",
        _ => "extsync_core=trace,extsync=trace,info",
    }
}

fn run(cli: &Cli) -> Result<()> {
    let store = ConfigStore::resolve(cli.config.as_deref());
    let config = store.load().context("Failed to load configuration")?;
    tracing::debug!(path = %store.config_path().display(), "Configuration loaded");

    let report = SyncCommand::new(config)
        .execute()
        .context("Extension reconciliation aborted")?;

    print_report(&report, cli.format)
}

fn print_report(report: &ReconcileReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if report.outcomes.is_empty() && report.deleted.is_empty() {
                println!("Nothing to reconcile for tenant {}", report.tenant_id);
                return Ok(());
            }

            println!("{:<20} {:<10} Remote id", "Extension", "Action");
            println!("{}", "-".repeat(45));
            for entry in &report.outcomes {
                let action = match entry.outcome {
                    MatchOutcome::Updated { .. } => "updated",
                    MatchOutcome::Created { .. } => "created",
                };
                println!(
                    "{:<20} {:<10} {}",
                    entry.identifier,
                    action,
                    entry.outcome.remote_id()
                );
            }
            for id in &report.deleted {
                println!("{:<20} {:<10} {}", "-", "deleted", id);
            }

            println!();
            println!(
                "✓ {} created, {} updated, {} deleted ({} pages)",
                report.created(),
                report.updated(),
                report.deleted(),
                report.pages
            );
            if report.duplicate_matches > 0 {
                println!(
                    "  ⚠ {} remote extensions were listed more than once",
                    report.duplicate_matches
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Quiet => {}
    }

    Ok(())
}

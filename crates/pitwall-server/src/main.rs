//! `pitwall` binary.
//!
//! Reads `pitwall.toml` (or the path given with `--config`) plus `PITWALL_*`
//! environment variables, then runs one subcommand.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use pitwall_server::ServerConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Formula 1 season results service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "pitwall.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API.
  Serve,
  /// Refresh the newest season(s) once and clear the response cache.
  Update,
  /// Load every upstream season into the store.
  Seed,
  /// Exit 0 if the store holds at least one season, 1 otherwise.
  SeedCheck,
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  match run(cli).await {
    Ok(code) => code,
    Err(err) => {
      tracing::error!(error = ?err, "pitwall failed");
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
  let config = ServerConfig::load(&cli.config)?;

  match cli.command {
    Command::Serve => pitwall_server::serve(config).await?,
    Command::Update => {
      if let Some(report) = pitwall_server::update(config).await? {
        tracing::info!(synced = ?report.synced, failed = ?report.failed, "update complete");
      }
    }
    Command::Seed => pitwall_server::seed(config).await?,
    Command::SeedCheck => {
      return Ok(if pitwall_server::seed_check(config).await {
        ExitCode::SUCCESS
      } else {
        ExitCode::FAILURE
      });
    }
  }
  Ok(ExitCode::SUCCESS)
}

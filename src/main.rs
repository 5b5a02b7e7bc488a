//! midday-jobs - run background jobs locally
//!
//! Runs a job against fixture data in memory instead of the hosted services.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use midday_jobs::jobs::{self, Events};
use midday_jobs::storage::Fixture;
use midday_jobs::utils::init_logging;
use midday_jobs::{Config, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "midday-jobs", version, about = "Run Midday background jobs locally")]
struct Cli {
    /// YAML configuration file; environment variables override it
    #[arg(long, short, env = "MIDDAY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sync a team's transactions from a fixture file
    ManualSync {
        /// Team to sync
        #[arg(long)]
        team_id: String,
        /// JSON file with accounts and provider transactions
        #[arg(long)]
        fixture: PathBuf,
    },
    /// Print the effective configuration
    PrintConfig,
    /// List the jobs this binary knows about
    ListJobs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path).await?.with_env_overrides(),
        None => Config::from_env(),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref()).await?;

    match cli.command {
        Command::ManualSync { team_id, fixture } => {
            init_logging(config.logging())?;

            let env = Fixture::from_file(&fixture)
                .await?
                .into_env(config.sync().clone())?;
            let payload = serde_json::json!({ "teamId": team_id });
            let summary = jobs::trigger(&env.context, Events::TRANSACTIONS_MANUAL_SYNC, payload)
                .await?;

            info!(
                "{} transactions stored, {} cache tags revalidated",
                env.store.transaction_count(),
                env.cache.tags().len()
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::PrintConfig => {
            print!("{}", config.to_yaml()?);
        }
        Command::ListJobs => {
            for definition in jobs::definitions() {
                println!(
                    "{}\t{}\tv{}\ton {}",
                    definition.id, definition.name, definition.version, definition.event
                );
            }
        }
    }

    Ok(())
}

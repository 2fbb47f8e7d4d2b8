//! Command-line entry point for the gyre scanner.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use eyre::{Error, Result};
use gyre::bot::Bot;
use gyre::config::Config;
use gyre::notify::SlackNotifier;
use gyre::utils::logger::setup_logger;

/// Cyclic arbitrage scanner for constant-product venues.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to run; watching is the default.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// The binary's subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run a single round and exit
    Scan {
        /// Pair list to load instead of the configured one
        #[arg(long)]
        pairs: Option<PathBuf>,
        /// Evaluate pinned reserves without touching the RPC endpoint
        #[arg(long)]
        offline: bool,
    },
    /// Poll rounds on the configured interval
    Watch {
        /// Pair list to load instead of the configured one
        #[arg(long)]
        pairs: Option<PathBuf>,
        /// Seconds between rounds
        #[arg(long)]
        interval: Option<u64>,
        /// Rounds to run before exiting
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// Send slack message
    Slack {
        /// Message text
        message: String,
    },
    /// Send slack error message
    SlackError {
        /// Message text
        message: String,
    },
}

/// Posts a message to the default channel.
async fn send_slack_message(message: &str) -> Result<(), Error> {
    let notifier = SlackNotifier::new()?;
    notifier.send(message).await?;
    Ok(())
}

/// Posts a message to the error channel.
async fn send_slack_error_message(message: &str) -> Result<(), Error> {
    let notifier = SlackNotifier::new()?;
    notifier.send_error(message).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    setup_logger()?;

    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.command {
        Some(Commands::Scan { pairs, offline }) => {
            if let Some(pairs) = pairs {
                config.pairs_file = pairs;
            }
            config.offline = config.offline || offline;
            Bot::new(config)?.scan().await?;
        }
        Some(Commands::Watch {
            pairs,
            interval,
            rounds,
        }) => {
            if let Some(pairs) = pairs {
                config.pairs_file = pairs;
            }
            if let Some(interval) = interval {
                config.interval = Duration::from_secs(interval);
            }
            if let Some(rounds) = rounds {
                config.rounds = rounds;
            }
            Bot::new(config)?.watch().await?;
        }
        Some(Commands::Slack { message }) => {
            send_slack_message(&message).await?;
        }
        Some(Commands::SlackError { message }) => {
            send_slack_error_message(&message).await?;
        }
        None => {
            // Default behavior when no subcommand is provided
            Bot::new(config)?.watch().await?;
        }
    }

    Ok(())
}

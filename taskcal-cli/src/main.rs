mod commands;
mod lock;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use taskcal_core::config::TaskcalConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskcal")]
#[command(about = "Mirror dated Taskwarrior tasks into your calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, update and delete calendar events to match your tasks
    Sync {
        /// Taskwarrior filter (defaults to task_filter from the config)
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show what a sync would change, without writing
    Status {
        /// Taskwarrior filter (defaults to task_filter from the config)
        #[arg(short, long)]
        filter: Option<String>,

        /// List every task instead of summarizing large plans
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the config path and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    install_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync { filter } => {
            let config = TaskcalConfig::load()?;
            commands::sync::run(&config, filter.as_deref(), cancel_on_ctrl_c()).await
        }
        Commands::Status { filter, verbose } => {
            let config = TaskcalConfig::load()?;
            commands::status::run(&config, filter.as_deref(), verbose, cancel_on_ctrl_c()).await
        }
        Commands::Config => commands::config::run(),
    }
}

/// Token cancelled on the first Ctrl-C. The write in flight completes, the
/// remaining ones are not started.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current write");
            cancel.cancel();
        }
    });
    token
}

fn install_tracing() {
    // RUST_LOG overrides the default of INFO.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sync_with_filter() {
        let cli = Cli::parse_from(["taskcal", "sync", "--filter", "project:home +next"]);
        match cli.command {
            Commands::Sync { filter } => assert_eq!(filter.as_deref(), Some("project:home +next")),
            _ => panic!("expected sync"),
        }
    }

    #[test]
    fn parse_status_defaults() {
        let cli = Cli::parse_from(["taskcal", "status"]);
        match cli.command {
            Commands::Status { filter, verbose } => {
                assert!(filter.is_none());
                assert!(!verbose);
            }
            _ => panic!("expected status"),
        }
    }

    #[test]
    fn parse_config() {
        let cli = Cli::parse_from(["taskcal", "config"]);
        assert!(matches!(cli.command, Commands::Config));
    }
}

//! # items CLI entry point
//!
//! Parses command-line arguments, resolves the API base URL and dispatches
//! to [`items_cli::commands::run_command`].

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use items_cli::commands::{run_command, Command};
use items_client::{ClientConfig, ItemClient};

/// Manage items stored by the Items API.
#[derive(Parser, Debug)]
#[command(name = "items", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// API base URL, including the `/api` prefix. Overrides ITEMS_API_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config = ClientConfig::from_env().context("loading client configuration")?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config
            .with_base_url(base_url)
            .context("parsing --base-url")?;
    }
    tracing::debug!(base_url = %config.base_url, "resolved API base URL");

    let client = ItemClient::new(&config)?;
    run_command(cli.command, client).await
}

//! AgriMap CLI - Command-line interface
//!
//! Drives parcel capture, registration and the visit-request feed from a
//! terminal.

mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;
mod terminal;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;
    if runtime.block_on(commands::execute(cli)).is_err() {
        // already reported by the output writer
        std::process::exit(1);
    }

    Ok(())
}

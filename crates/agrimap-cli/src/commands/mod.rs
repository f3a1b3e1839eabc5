//! Command implementations

mod area;
mod config;
mod status;
mod submit;
mod watch;

use crate::cli::{Cli, Commands};
use crate::config_loader::{global_overrides, load_config_with_overrides};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command, reporting any failure through the output writer
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let result = dispatch(cli, &output).await;
    if let Err(e) = &result {
        output.error(format!("{:#}", e));
    }
    result
}

async fn dispatch(cli: Cli, output: &OutputWriter) -> Result<()> {
    let overrides = global_overrides(cli.base_url.as_deref())?;
    let config = load_config_with_overrides(cli.config.as_deref(), overrides)?;

    match cli.command {
        Commands::Area(args) => area::execute(args, output),
        Commands::Submit(args) => submit::execute(args, &config, output).await,
        Commands::Watch(args) => watch::execute(args, config, output).await,
        Commands::Status(args) => status::execute(args, &config, output).await,
        Commands::Config => config::execute(&config, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_failure_is_returned_after_reporting() {
        let cli = Cli::try_parse_from([
            "agrimap", "--json", "submit", "--point", "15.4865,75.117", "--point",
            "15.4865,75.117", "--point", "15.484,75.1195",
        ])
        .unwrap();

        let err = execute(cli).await.unwrap_err();
        assert!(format!("{:#}", err).starts_with("Boundary rejected"));
    }
}

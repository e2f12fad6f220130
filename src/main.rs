//! Indicator engine CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use ta_config::{load_config, LoggingConfig};
use ta_report::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags override the [logging] section
    let logging = if cli.config.exists() {
        load_config(&cli.config).map(|c| c.logging).unwrap_or_default()
    } else {
        LoggingConfig::default()
    };
    let level = cli
        .log_level
        .as_ref()
        .map_or(logging.level.as_str(), |l| l.as_str());
    setup_logging(level, cli.json_logs || logging.is_json())?;

    // Execute command
    match cli.command {
        Commands::Compute(args) => cli::commands::compute::run(args, &cli.config).await,
        Commands::Compare(args) => cli::commands::compare::run(args, &cli.config).await,
        Commands::Indicators => cli::commands::indicators::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}

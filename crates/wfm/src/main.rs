//! wfm - Workforce planning CLI
//!
//! Forecasts weekly call volume through the planning service and derives a
//! staffing schedule from the forecast.

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so JSON output stays clean
    let level = log_level(cli.verbose);
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive(format!("wfm={}", level).parse()?)
                .add_directive(format!("wfm_core={}", level).parse()?),
        )
        .init();

    // Load configuration
    let config = config::Config::load()?.with_api_url(cli.api_url);
    debug!("Using planning service at {}", config.api.url);

    // Execute command
    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args, &config).await,
        Commands::Forecast(args) => commands::plan::execute_forecast(args, &config).await,
        Commands::Health => commands::health::execute(&config).await,
        Commands::Config(cmd) => commands::config::execute(cmd, &config),
        Commands::Version => {
            println!("wfm {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Default filter level for this workspace's crates; RUST_LOG still applies.
fn log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_to_info() {
        assert_eq!(log_level(false), "info");
        assert_eq!(log_level(true), "debug");
    }
}

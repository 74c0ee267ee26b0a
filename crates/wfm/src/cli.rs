//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand};

/// Workforce planning CLI
///
/// Forecasts weekly call volume and derives a staffing schedule from it.
#[derive(Parser, Debug)]
#[command(name = "wfm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Planning service URL (overrides the config file)
    #[arg(long, global = true, env = "WFM_API_URL")]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast call volume and derive a staffing schedule
    Plan(PlanArgs),

    /// Forecast call volume only (the schedule still runs, but is not shown)
    Forecast(ForecastArgs),

    /// Check that the planning service is reachable
    Health,

    /// Configuration management
    Config(ConfigCommand),

    /// Show version
    Version,
}

// ─────────────────────────────────────────────────────────────────────────────
// Planning Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone, Default)]
pub struct ForecastArgs {
    /// First week of the forecast (defaults to config)
    #[arg(short, long)]
    pub start_week: Option<String>,

    /// Last week of the forecast, inclusive (defaults to config)
    #[arg(short, long)]
    pub end_week: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    #[command(flatten)]
    pub forecast: ForecastArgs,

    /// Number of available agents (defaults to config)
    #[arg(short, long)]
    pub agents: Option<String>,

    /// Maximum calls one agent can handle (defaults to config)
    #[arg(short, long)]
    pub max_calls: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plan_args() {
        let cli = Cli::try_parse_from([
            "wfm", "plan", "--start-week", "2", "--end-week", "6", "--agents", "12", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.forecast.start_week.as_deref(), Some("2"));
                assert_eq!(args.forecast.end_week.as_deref(), Some("6"));
                assert_eq!(args.agents.as_deref(), Some("12"));
                assert!(args.max_calls.is_none());
                assert!(args.forecast.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_api_url_flag() {
        let cli = Cli::try_parse_from(["wfm", "health", "--api-url", "http://example:9000"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://example:9000"));
        assert!(matches!(cli.command, Commands::Health));
    }
}

//! Forecast and plan commands.
//!
//! Both drive the same orchestration flow: request a forecast, which
//! automatically requests a schedule once it succeeds. `plan` renders both
//! stages; `forecast` renders only the forecast stage.

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use wfm_core::client::ApiClient;
use wfm_core::orchestrator::{OrchestrationState, Orchestrator, StageState, StageStatus};
use wfm_core::types::{ForecastResult, ScheduleBlock, ScheduleParamsInput, WeekRangeInput};

use crate::cli::{ForecastArgs, PlanArgs};
use crate::config::Config;

pub async fn execute(args: PlanArgs, config: &Config) -> Result<()> {
    let state = run(&args, config).await?;

    if args.forecast.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_forecast(&state.forecast);
        println!();
        print_schedule(&state.schedule);
    }

    if state.has_error() {
        bail!("Planning finished with errors");
    }
    Ok(())
}

pub async fn execute_forecast(args: ForecastArgs, config: &Config) -> Result<()> {
    let json = args.json;
    let plan = PlanArgs {
        forecast: args,
        ..Default::default()
    };
    let state = run(&plan, config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state.forecast)?);
    } else {
        print_forecast(&state.forecast);
    }

    if state.forecast.status == StageStatus::Error {
        bail!("Forecast failed");
    }
    Ok(())
}

/// Run the forecast-to-schedule flow against the configured service.
async fn run(args: &PlanArgs, config: &Config) -> Result<OrchestrationState> {
    let client = ApiClient::with_timeout(config.api.url.as_str(), config.timeout())
        .context("Failed to create API client")?;
    debug!("Planning against {}", client.base_url());
    let orchestrator = Orchestrator::new(client.clone(), client);

    orchestrator
        .set_schedule_parameters(&schedule_input(args, config))
        .map_err(|e| anyhow!("Invalid schedule parameters: {}", e))?;

    let progress = (!args.forecast.json).then(|| spawn_progress(orchestrator.subscribe()));
    let state = orchestrator
        .request_forecast(&range_input(&args.forecast, config))
        .await;

    if let Some(handle) = progress {
        handle.abort();
    }
    debug!(
        "Finished: forecast {}, schedule {}",
        state.forecast.status, state.schedule.status
    );
    Ok(state)
}

/// Week range from flags, falling back to config.
fn range_input(args: &ForecastArgs, config: &Config) -> WeekRangeInput {
    WeekRangeInput {
        start_week: args
            .start_week
            .clone()
            .or_else(|| Some(config.forecast.start_week.to_string())),
        end_week: args
            .end_week
            .clone()
            .or_else(|| Some(config.forecast.end_week.to_string())),
    }
}

/// Staffing parameters from flags, falling back to config.
fn schedule_input(args: &PlanArgs, config: &Config) -> ScheduleParamsInput {
    ScheduleParamsInput {
        num_agents: args
            .agents
            .clone()
            .or_else(|| Some(config.schedule.num_agents.to_string())),
        max_calls_per_agent: args
            .max_calls
            .clone()
            .or_else(|| Some(config.schedule.max_calls_per_agent.to_string())),
    }
}

/// Print a line to stderr whenever a stage starts loading.
fn spawn_progress(mut rx: watch::Receiver<OrchestrationState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = (StageStatus::Idle, StageStatus::Idle);
        while rx.changed().await.is_ok() {
            let current = {
                let state = rx.borrow_and_update();
                (state.forecast.status, state.schedule.status)
            };
            if current.0 == StageStatus::Loading && last.0 != StageStatus::Loading {
                eprintln!("{}", "Loading forecast...".dimmed());
            }
            if current.1 == StageStatus::Loading && last.1 != StageStatus::Loading {
                eprintln!("{}", "Generating schedule...".dimmed());
            }
            last = current;
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

fn print_forecast(stage: &StageState<ForecastResult>) {
    println!("{}", "Workforce Forecast".bold());

    if let Some(ref error) = stage.error {
        println!("  {} {}", "✗".red(), error.message.red());
    }

    if stage.data.is_empty() {
        println!("  {}", "No predictions available".dimmed());
        return;
    }

    println!("  {}", "Predictions:".bold());
    for (label, calls) in stage.data.periods() {
        println!("  {:<10} {}", label, calls.to_string().cyan());
    }
}

fn print_schedule(stage: &StageState<Vec<ScheduleBlock>>) {
    println!("{}", "Staff Scheduling".bold());

    if let Some(ref error) = stage.error {
        println!("  {} {}", "✗".red(), error.message.red());
    }
    if let Some(ref notice) = stage.notice {
        println!("  {}", notice.yellow());
    }

    if stage.data.is_empty() {
        if stage.notice.is_none() {
            println!("  {}", "No schedule generated".dimmed());
        }
        return;
    }

    println!("  {}", "Schedule:".bold());
    for (i, block) in stage.data.iter().enumerate() {
        println!("  {}", format_block(i, block));
    }
}

fn format_block(index: usize, block: &ScheduleBlock) -> String {
    let mut line = format!(
        "{:<10} {:>4} agents  {:>6} calls",
        block.label(index),
        block.agents_needed,
        block.forecasted_calls.to_string()
    );
    if let Some(ref shift) = block.shift_label {
        line.push_str(&format!("  [{}]", shift));
    }
    if let Some(per_agent) = block.calls_per_agent.as_ref().and_then(|n| n.as_f64()) {
        line.push_str(&format!("  {:.1}/agent", per_agent));
    }
    if let Some(load) = block.load_percentage.as_ref().and_then(|n| n.as_f64()) {
        line.push_str(&format!("  {:.0}% load", load));
    }
    line
}

//! Input validation.
//!
//! Pure, synchronous checks run before any request is dispatched. Nothing in
//! here performs I/O or touches orchestration state.

use thiserror::Error;

use crate::types::{
    MIN_MAX_CALLS_PER_AGENT, ScheduleParameters, ScheduleParamsInput, WeekRange, WeekRangeInput,
};

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(String),

    #[error("{field} must be an integer, got '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("{0}")]
    OutOfRange(String),

    #[error("End week must be greater than or equal to start week")]
    InvalidRange,
}

/// Validate raw week-range input.
pub fn validate_week_range(input: &WeekRangeInput) -> Result<WeekRange, ValidationError> {
    let start = parse_integer("Start week", input.start_week.as_deref())?;
    let end = parse_integer("End week", input.end_week.as_deref())?;
    WeekRange::new(start, end)
}

/// Validate raw staffing input.
///
/// An absent `max_calls_per_agent` falls back to the default capacity.
pub fn validate_schedule_params(
    input: &ScheduleParamsInput,
) -> Result<ScheduleParameters, ValidationError> {
    let num_agents = parse_integer("Number of agents", input.num_agents.as_deref())?;
    let max_calls = match input.max_calls_per_agent.as_deref() {
        Some(raw) if !raw.trim().is_empty() => {
            Some(parse_integer("Max calls per agent", Some(raw))?)
        }
        _ => None,
    };
    ScheduleParameters::new(num_agents, max_calls)
}

pub(crate) fn check_week_bounds(start_week: i64, end_week: i64) -> Result<(), ValidationError> {
    if start_week < 1 {
        return Err(ValidationError::OutOfRange(
            "Start week must be at least 1".into(),
        ));
    }
    if end_week < start_week {
        return Err(ValidationError::InvalidRange);
    }
    if end_week > i64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange("End week is too large".into()));
    }
    Ok(())
}

pub(crate) fn check_schedule_bounds(
    num_agents: i64,
    max_calls_per_agent: Option<i64>,
) -> Result<(), ValidationError> {
    if num_agents < 1 {
        return Err(ValidationError::OutOfRange(
            "Number of agents must be at least 1".into(),
        ));
    }
    if num_agents > i64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange(
            "Number of agents is too large".into(),
        ));
    }
    if let Some(max_calls) = max_calls_per_agent {
        if max_calls < i64::from(MIN_MAX_CALLS_PER_AGENT) {
            return Err(ValidationError::OutOfRange(format!(
                "Max calls per agent must be at least {}",
                MIN_MAX_CALLS_PER_AGENT
            )));
        }
        if max_calls > i64::from(u32::MAX) {
            return Err(ValidationError::OutOfRange(
                "Max calls per agent is too large".into(),
            ));
        }
    }
    Ok(())
}

/// Parse an integer field; decimals such as "5.0" are rejected.
fn parse_integer(field: &str, raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ValidationError::Required(field.to_string())),
    };

    raw.parse::<i64>().map_err(|_| ValidationError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

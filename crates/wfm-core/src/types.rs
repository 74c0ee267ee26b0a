//! Shared planning types.
//!
//! These are the value objects that flow between the validator, the remote
//! clients and the orchestrator, plus the JSON payloads of the wire contract.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Default number of agents offered for scheduling.
pub const DEFAULT_NUM_AGENTS: u32 = 10;

/// Default per-agent call capacity sent with schedule requests.
pub const DEFAULT_MAX_CALLS_PER_AGENT: u32 = 40;

/// Smallest accepted per-agent call capacity.
pub const MIN_MAX_CALLS_PER_AGENT: u32 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Week Range
// ─────────────────────────────────────────────────────────────────────────────

/// A validated, inclusive range of forecast weeks.
///
/// Only constructible through validation, so `start_week >= 1` and
/// `end_week >= start_week` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    start_week: u32,
    end_week: u32,
}

impl WeekRange {
    /// Build a range from already-typed week numbers.
    pub fn new(start_week: i64, end_week: i64) -> Result<Self, ValidationError> {
        validation::check_week_bounds(start_week, end_week)?;
        Ok(Self {
            start_week: start_week as u32,
            end_week: end_week as u32,
        })
    }

    pub fn start_week(&self) -> u32 {
        self.start_week
    }

    pub fn end_week(&self) -> u32 {
        self.end_week
    }

    /// Number of weeks covered, the only value the remote service receives.
    pub fn num_weeks(&self) -> u32 {
        self.end_week - self.start_week + 1
    }
}

/// Raw user input for a week range, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekRangeInput {
    pub start_week: Option<String>,
    pub end_week: Option<String>,
}

impl WeekRangeInput {
    pub fn new(start_week: impl ToString, end_week: impl ToString) -> Self {
        Self {
            start_week: Some(start_week.to_string()),
            end_week: Some(end_week.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Forecast
// ─────────────────────────────────────────────────────────────────────────────

/// Rounded call-volume predictions, one per week.
///
/// Index `i` is displayed as "Week i+1".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastResult(Vec<u64>);

impl ForecastResult {
    pub fn new(values: Vec<u64>) -> Self {
        Self(values)
    }

    /// Round raw predictions to whole calls.
    ///
    /// Returns `None` if any value is negative or not finite; the whole
    /// sequence is rejected rather than truncated.
    pub fn from_predictions(raw: &[f64]) -> Option<Self> {
        raw.iter()
            .map(|v| {
                if v.is_finite() && *v >= 0.0 {
                    Some(v.round() as u64)
                } else {
                    None
                }
            })
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    pub fn values(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `("Week n", value)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("Week {}", i + 1), *v))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Schedule
// ─────────────────────────────────────────────────────────────────────────────

/// Validated staffing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParameters {
    pub num_agents: u32,
    pub max_calls_per_agent: u32,
}

impl Default for ScheduleParameters {
    fn default() -> Self {
        Self {
            num_agents: DEFAULT_NUM_AGENTS,
            max_calls_per_agent: DEFAULT_MAX_CALLS_PER_AGENT,
        }
    }
}

impl ScheduleParameters {
    pub fn new(num_agents: i64, max_calls_per_agent: Option<i64>) -> Result<Self, ValidationError> {
        validation::check_schedule_bounds(num_agents, max_calls_per_agent)?;
        Ok(Self {
            num_agents: num_agents as u32,
            max_calls_per_agent: max_calls_per_agent
                .map(|v| v as u32)
                .unwrap_or(DEFAULT_MAX_CALLS_PER_AGENT),
        })
    }
}

/// Raw user input for staffing parameters, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleParamsInput {
    pub num_agents: Option<String>,
    pub max_calls_per_agent: Option<String>,
}

impl ScheduleParamsInput {
    pub fn new(num_agents: impl ToString) -> Self {
        Self {
            num_agents: Some(num_agents.to_string()),
            max_calls_per_agent: None,
        }
    }

    pub fn with_max_calls(mut self, max_calls_per_agent: impl ToString) -> Self {
        self.max_calls_per_agent = Some(max_calls_per_agent.to_string());
        self
    }
}

/// One staffing recommendation produced by the remote service.
///
/// Passed through as received; unknown fields are preserved in `extra`.
/// Call figures stay JSON numbers so `100` is not re-emitted as `100.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,

    #[serde(default, alias = "period", skip_serializing_if = "Option::is_none")]
    pub period_label: Option<String>,

    #[serde(default, alias = "shift", skip_serializing_if = "Option::is_none")]
    pub shift_label: Option<String>,

    pub agents_needed: u32,

    pub forecasted_calls: serde_json::Number,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls_per_agent: Option<serde_json::Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_percentage: Option<serde_json::Number>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ScheduleBlock {
    /// Display label for the period, falling back to the block's position.
    pub fn label(&self, index: usize) -> String {
        if let Some(ref label) = self.period_label {
            return label.clone();
        }
        match self.week {
            Some(week) => format!("Week {}", week),
            None => format!("Week {}", index + 1),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Payloads
// ─────────────────────────────────────────────────────────────────────────────

/// `POST /forecast` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub num_weeks: u32,
}

impl From<&WeekRange> for ForecastRequest {
    fn from(range: &WeekRange) -> Self {
        Self {
            num_weeks: range.num_weeks(),
        }
    }
}

/// `POST /schedule` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub forecasted_calls: Vec<u64>,
    pub num_agents: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_calls_per_agent: Option<u32>,
}

impl ScheduleRequest {
    pub fn new(forecast: &ForecastResult, params: &ScheduleParameters) -> Self {
        Self {
            forecasted_calls: forecast.values().to_vec(),
            num_agents: params.num_agents,
            max_calls_per_agent: Some(params.max_calls_per_agent),
        }
    }
}

/// `GET /` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
}

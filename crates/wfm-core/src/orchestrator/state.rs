//! Per-stage orchestration state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::types::{ForecastResult, ScheduleBlock};

/// Status of one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StageStatus::Idle => "idle",
            StageStatus::Loading => "loading",
            StageStatus::Success => "success",
            StageStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A failure recorded on a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for StageError {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Status, data and messages for one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageState<T> {
    pub status: StageStatus,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StageError>,
    /// Informational message, e.g. why the stage could not start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T: Default> StageState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == StageStatus::Loading
    }

    pub(crate) fn start_loading(&mut self) {
        self.status = StageStatus::Loading;
        self.error = None;
        self.notice = None;
        self.touch();
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.status = StageStatus::Success;
        self.data = data;
        self.error = None;
        self.notice = None;
        self.touch();
    }

    /// Record a failed call; the previous result is discarded.
    pub(crate) fn fail(&mut self, err: &Error) {
        self.status = StageStatus::Error;
        self.data = T::default();
        self.error = Some(err.into());
        self.notice = None;
        self.touch();
    }

    /// Record rejected input; nothing was dispatched, so data is kept.
    pub(crate) fn reject(&mut self, err: &Error) {
        self.status = StageStatus::Error;
        self.error = Some(err.into());
        self.notice = None;
        self.touch();
    }

    /// Back to idle with no data.
    pub(crate) fn reset(&mut self, notice: Option<String>) {
        self.status = StageStatus::Idle;
        self.data = T::default();
        self.error = None;
        self.notice = notice;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationState {
    pub forecast: StageState<ForecastResult>,
    pub schedule: StageState<Vec<ScheduleBlock>>,
}

impl OrchestrationState {
    /// True when either stage ended in error.
    pub fn has_error(&self) -> bool {
        self.forecast.status == StageStatus::Error || self.schedule.status == StageStatus::Error
    }

    pub fn is_loading(&self) -> bool {
        self.forecast.is_loading() || self.schedule.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_discards_data() {
        let mut stage = StageState::<Vec<u32>>::default();
        stage.succeed(vec![1, 2]);
        assert_eq!(stage.status, StageStatus::Success);

        stage.fail(&Error::http_status(500, "boom"));
        assert_eq!(stage.status, StageStatus::Error);
        assert!(stage.data.is_empty());
        assert_eq!(stage.error.as_ref().unwrap().kind, ErrorKind::Transport);
    }

    #[test]
    fn test_reject_keeps_data() {
        let mut stage = StageState::<Vec<u32>>::default();
        stage.succeed(vec![3]);

        stage.reject(&Error::Config("bad".into()));
        assert_eq!(stage.status, StageStatus::Error);
        assert_eq!(stage.data, vec![3]);
    }

    #[test]
    fn test_loading_clears_error_and_notice() {
        let mut stage = StageState::<Vec<u32>>::default();
        stage.reset(Some("hint".into()));
        stage.fail(&Error::shape("bad"));

        stage.start_loading();
        assert!(stage.is_loading());
        assert!(stage.error.is_none());
        assert!(stage.notice.is_none());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let state = OrchestrationState::default();
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["forecast"]["status"], "idle");
        assert_eq!(value["schedule"]["data"], serde_json::json!([]));
        assert!(value["forecast"].get("error").is_none());
    }
}

//! Forecast-to-schedule orchestration.
//!
//! The [`Orchestrator`] owns the [`OrchestrationState`] and is the only thing
//! that writes it. It drives two stages:
//!
//! - **forecast**: validate the week range, call the forecast service, store
//!   the rounded predictions.
//! - **schedule**: gated on a non-empty forecast, call the schedule service
//!   with the stored staffing parameters.
//!
//! Every successful forecast automatically re-runs the schedule stage once the
//! forecast call has fully resolved. A failed forecast invalidates the
//! schedule.
//!
//! Each dispatch takes a per-stage sequence number. When a response arrives
//! for a sequence number that is no longer the latest, it is dropped, so the
//! most recent user action always wins over slower earlier requests.
//!
//! Consumers read state with [`Orchestrator::state`] or watch it with
//! [`Orchestrator::subscribe`].

mod state;

pub use state::{OrchestrationState, StageError, StageState, StageStatus};

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::{ForecastApi, ScheduleApi};
use crate::error::Error;
use crate::types::{ScheduleParameters, ScheduleParamsInput, WeekRangeInput};
use crate::validation::{self, ValidationError};

/// Shown on the schedule stage while there is no forecast to schedule from.
pub const FORECAST_REQUIRED_NOTICE: &str = "Generate forecast first";

/// Coordinates the forecast and schedule services.
pub struct Orchestrator<F, S> {
    forecast_api: F,
    schedule_api: S,
    state: watch::Sender<OrchestrationState>,
    params: Mutex<ScheduleParameters>,
    forecast_seq: AtomicU64,
    schedule_seq: AtomicU64,
}

impl<F: ForecastApi, S: ScheduleApi> Orchestrator<F, S> {
    /// Create an orchestrator with default staffing parameters.
    pub fn new(forecast_api: F, schedule_api: S) -> Self {
        Self::with_parameters(forecast_api, schedule_api, ScheduleParameters::default())
    }

    /// Create an orchestrator with the given staffing parameters.
    pub fn with_parameters(forecast_api: F, schedule_api: S, params: ScheduleParameters) -> Self {
        let (state, _) = watch::channel(OrchestrationState::default());
        Self {
            forecast_api,
            schedule_api,
            state,
            params: Mutex::new(params),
            forecast_seq: AtomicU64::new(0),
            schedule_seq: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> OrchestrationState {
        self.state.borrow().clone()
    }

    /// Receive a notification on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<OrchestrationState> {
        self.state.subscribe()
    }

    /// Staffing parameters used by the next schedule request.
    pub fn schedule_parameters(&self) -> ScheduleParameters {
        *self.params.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Validate and store staffing parameters without dispatching.
    ///
    /// Invalid input leaves the stored parameters untouched.
    pub fn set_schedule_parameters(
        &self,
        input: &ScheduleParamsInput,
    ) -> Result<ScheduleParameters, ValidationError> {
        let params = validation::validate_schedule_params(input)?;
        *self.params.lock().unwrap_or_else(|e| e.into_inner()) = params;
        debug!(
            num_agents = params.num_agents,
            max_calls_per_agent = params.max_calls_per_agent,
            "Schedule parameters updated"
        );
        Ok(params)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Forecast Stage
    // ─────────────────────────────────────────────────────────────────────────

    /// Request a forecast for the given week range.
    ///
    /// Invalid input puts the forecast stage in error without any call.
    /// Dispatching supersedes any schedule request still in flight. A
    /// successful forecast is followed by a schedule request; a failed one
    /// clears the forecast and the schedule.
    pub async fn request_forecast(&self, input: &WeekRangeInput) -> OrchestrationState {
        let seq = self.forecast_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let range = match validation::validate_week_range(input) {
            Ok(range) => range,
            Err(e) => {
                let err = Error::from(e);
                warn!("Forecast rejected: {}", err);
                self.state.send_modify(|s| s.forecast.reject(&err));
                return self.state();
            }
        };

        info!(
            start_week = range.start_week(),
            end_week = range.end_week(),
            "Requesting forecast"
        );
        // A schedule still in flight belongs to the forecast being replaced.
        self.invalidate_schedule();
        self.state.send_modify(|s| {
            s.forecast.start_loading();
            if s.schedule.is_loading() {
                s.schedule.reset(None);
            }
        });

        let result = self.forecast_api.forecast(&range).await;

        if self.forecast_seq.load(Ordering::SeqCst) != seq {
            warn!(seq, "Discarding stale forecast response");
            return self.state();
        }

        match result {
            Ok(forecast) => {
                info!(predictions = forecast.len(), "Forecast ready");
                self.state.send_modify(|s| s.forecast.succeed(forecast));
                self.request_schedule().await
            }
            Err(err) => {
                warn!("Forecast failed: {}", err);
                self.invalidate_schedule();
                self.state.send_modify(|s| {
                    s.forecast.fail(&err);
                    s.schedule.reset(None);
                });
                self.state()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Schedule Stage
    // ─────────────────────────────────────────────────────────────────────────

    /// Validate and store staffing parameters, then request a schedule.
    ///
    /// Invalid input puts the schedule stage in error without any call.
    pub async fn request_schedule_with(&self, input: &ScheduleParamsInput) -> OrchestrationState {
        if let Err(e) = self.set_schedule_parameters(input) {
            let err = Error::from(e);
            warn!("Schedule rejected: {}", err);
            self.invalidate_schedule();
            self.state.send_modify(|s| s.schedule.reject(&err));
            return self.state();
        }
        self.request_schedule().await
    }

    /// Request a schedule for the current forecast.
    ///
    /// Without a forecast the schedule stage goes idle with a notice and
    /// nothing is dispatched.
    pub async fn request_schedule(&self) -> OrchestrationState {
        let forecast = self.state.borrow().forecast.data.clone();
        let params = self.schedule_parameters();
        let seq = self.schedule_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if forecast.is_empty() {
            debug!("No forecast available, schedule not requested");
            self.state
                .send_modify(|s| s.schedule.reset(Some(FORECAST_REQUIRED_NOTICE.to_string())));
            return self.state();
        }

        info!(
            periods = forecast.len(),
            num_agents = params.num_agents,
            "Requesting schedule"
        );
        self.state.send_modify(|s| s.schedule.start_loading());

        let result = self.schedule_api.schedule(&forecast, &params).await;

        if self.schedule_seq.load(Ordering::SeqCst) != seq {
            warn!(seq, "Discarding stale schedule response");
            return self.state();
        }

        match result {
            Ok(blocks) => {
                info!(blocks = blocks.len(), "Schedule ready");
                self.state.send_modify(|s| s.schedule.succeed(blocks));
            }
            Err(err) => {
                warn!("Schedule failed: {}", err);
                self.state.send_modify(|s| s.schedule.fail(&err));
            }
        }
        self.state()
    }

    /// Supersede any in-flight schedule request.
    fn invalidate_schedule(&self) {
        self.schedule_seq.fetch_add(1, Ordering::SeqCst);
    }
}

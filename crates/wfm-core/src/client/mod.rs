//! Remote planning service clients.
//!
//! The orchestrator only sees the [`ForecastApi`] and [`ScheduleApi`] traits.
//! [`ApiClient`] implements both over JSON/HTTP:
//!
//! - `POST /forecast` with `{ num_weeks }` → `{ predictions: [number] }`
//! - `POST /schedule` with `{ forecasted_calls, num_agents, max_calls_per_agent }`
//!   → `{ schedule: [block] }`
//!
//! # Usage
//!
//! ```rust,no_run
//! use wfm_core::client::{ApiClient, ForecastApi};
//! use wfm_core::types::WeekRange;
//!
//! #[tokio::main]
//! async fn main() -> wfm_core::Result<()> {
//!     let client = ApiClient::new("http://localhost:8000")?;
//!     let forecast = client.forecast(&WeekRange::new(1, 5)?).await?;
//!     println!("{:?}", forecast.values());
//!     Ok(())
//! }
//! ```

mod forecast;
mod schedule;

pub use forecast::parse_predictions;
pub use schedule::parse_schedule;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ForecastResult, ScheduleBlock, ScheduleParameters, WeekRange};

/// Source of call-volume forecasts.
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Forecast the weeks in `range`, rounded to whole calls.
    async fn forecast(&self, range: &WeekRange) -> Result<ForecastResult>;
}

/// Source of staffing schedules derived from a forecast.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// Build a schedule for a non-empty forecast.
    async fn schedule(
        &self,
        forecast: &ForecastResult,
        params: &ScheduleParameters,
    ) -> Result<Vec<ScheduleBlock>>;
}

#[async_trait]
impl<T: ForecastApi + ?Sized> ForecastApi for std::sync::Arc<T> {
    async fn forecast(&self, range: &WeekRange) -> Result<ForecastResult> {
        (**self).forecast(range).await
    }
}

#[async_trait]
impl<T: ScheduleApi + ?Sized> ScheduleApi for std::sync::Arc<T> {
    async fn schedule(
        &self,
        forecast: &ForecastResult,
        params: &ScheduleParameters,
    ) -> Result<Vec<ScheduleBlock>> {
        (**self).schedule(forecast, params).await
    }
}

#[cfg(feature = "client")]
mod transport;

#[cfg(feature = "client")]
pub use transport::ApiClient;

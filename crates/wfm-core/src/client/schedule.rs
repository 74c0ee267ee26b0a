//! Schedule client: `POST /schedule`.

use serde_json::Value;

use crate::error::{Error, INVALID_SCHEDULE_FORMAT, Result};
use crate::types::ScheduleBlock;

/// Normalize a schedule response body.
///
/// The `schedule` field must be an array; each element is taken as-is,
/// but must at least carry `agents_needed` and `forecasted_calls`.
pub fn parse_schedule(body: &Value) -> Result<Vec<ScheduleBlock>> {
    let invalid = || Error::shape(INVALID_SCHEDULE_FORMAT);

    let items = body
        .get("schedule")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?;

    items
        .iter()
        .map(|item| serde_json::from_value::<ScheduleBlock>(item.clone()).map_err(|_| invalid()))
        .collect()
}

#[cfg(feature = "client")]
mod remote {
    use async_trait::async_trait;
    use tracing::debug;

    use super::parse_schedule;
    use crate::client::{ApiClient, ScheduleApi};
    use crate::error::{Error, INVALID_SCHEDULE_FORMAT, Result};
    use crate::types::{ForecastResult, ScheduleBlock, ScheduleParameters, ScheduleRequest};

    #[async_trait]
    impl ScheduleApi for ApiClient {
        async fn schedule(
            &self,
            forecast: &ForecastResult,
            params: &ScheduleParameters,
        ) -> Result<Vec<ScheduleBlock>> {
            let request = ScheduleRequest::new(forecast, params);
            let body = self.post_json("/schedule", &request).await?;

            let value = serde_json::from_str(&body)
                .map_err(|_| Error::shape(INVALID_SCHEDULE_FORMAT))?;
            let blocks = parse_schedule(&value)?;

            debug!(
                periods = request.forecasted_calls.len(),
                blocks = blocks.len(),
                "Schedule received"
            );
            Ok(blocks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_parse_schedule_passes_blocks_through() {
        let body = json!({
            "schedule": [
                { "week": 1, "agents_needed": 8, "forecasted_calls": 100 },
                { "week": 2, "shift": "evening", "agents_needed": 4, "forecasted_calls": 150,
                  "calls_per_agent": 37.5, "load_percentage": 93.75 }
            ]
        });

        let blocks = parse_schedule(&body).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].agents_needed, 8);
        assert_eq!(blocks[0].forecasted_calls.as_u64(), Some(100));
        assert_eq!(blocks[1].shift_label.as_deref(), Some("evening"));
        assert_eq!(blocks[1].calls_per_agent.as_ref().and_then(|n| n.as_f64()), Some(37.5));
        assert_eq!(blocks[1].load_percentage.as_ref().and_then(|n| n.as_f64()), Some(93.75));
    }

    #[test]
    fn test_parse_schedule_rejects_bad_shapes() {
        let bad = [
            json!({ "schedule": "nope" }),
            json!({ "schedule": [{ "week": 1 }] }),
            json!({ "schedule": [{ "agents_needed": "many", "forecasted_calls": 1 }] }),
            json!({ "blocks": [] }),
            json!(42),
        ];

        for body in bad {
            let err = parse_schedule(&body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Shape, "body: {}", body);
            assert_eq!(err.to_string(), INVALID_SCHEDULE_FORMAT);
        }
    }
}

#[cfg(all(test, feature = "client"))]
mod remote_tests {
    use crate::client::stub::{self, Reply};
    use crate::client::{ApiClient, ScheduleApi};
    use crate::error::ErrorKind;
    use crate::types::{ForecastResult, ScheduleParameters};
    use serde_json::json;

    #[tokio::test]
    async fn test_schedule_sends_forecast_and_parameters() {
        let (url, recorded) = stub::serve(
            Reply::json(json!({ "predictions": [] })),
            Reply::json(json!({
                "schedule": [
                    { "week": 1, "agents_needed": 8, "forecasted_calls": 100 },
                    { "week": 2, "agents_needed": 8, "forecasted_calls": 150 }
                ]
            })),
        )
        .await;
        let client = ApiClient::new(url).unwrap();
        let forecast = ForecastResult::new(vec![100, 150]);
        let params = ScheduleParameters {
            num_agents: 10,
            max_calls_per_agent: 40,
        };

        let blocks = client.schedule(&forecast, &params).await.unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].week, Some(2));
        let recorded = recorded.lock().unwrap();
        assert_eq!(
            recorded.schedule_bodies,
            vec![json!({
                "forecasted_calls": [100, 150],
                "num_agents": 10,
                "max_calls_per_agent": 40
            })]
        );
    }

    #[tokio::test]
    async fn test_schedule_server_error() {
        let (url, _) = stub::serve(
            Reply::json(json!({ "predictions": [] })),
            Reply::status(500, "internal error"),
        )
        .await;
        let client = ApiClient::new(url).unwrap();

        let err = client
            .schedule(&ForecastResult::new(vec![1]), &ScheduleParameters::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal error"));
    }
}

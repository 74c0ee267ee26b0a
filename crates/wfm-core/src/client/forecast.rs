//! Forecast client: `POST /forecast`.

use serde_json::Value;

use crate::error::{Error, INVALID_PREDICTION_FORMAT, Result};
use crate::types::ForecastResult;

/// Normalize a forecast response body.
///
/// The body must be an object whose `predictions` field is an array of
/// non-negative numbers. Anything else is a shape error; no partial result is
/// ever returned.
pub fn parse_predictions(body: &Value) -> Result<ForecastResult> {
    let invalid = || Error::shape(INVALID_PREDICTION_FORMAT);

    let items = body
        .get("predictions")
        .and_then(Value::as_array)
        .ok_or_else(invalid)?;

    let raw = items
        .iter()
        .map(Value::as_f64)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(invalid)?;

    ForecastResult::from_predictions(&raw).ok_or_else(invalid)
}

#[cfg(feature = "client")]
mod remote {
    use async_trait::async_trait;
    use tracing::debug;

    use super::parse_predictions;
    use crate::client::{ApiClient, ForecastApi};
    use crate::error::{Error, INVALID_PREDICTION_FORMAT, Result};
    use crate::types::{ForecastRequest, ForecastResult, WeekRange};

    #[async_trait]
    impl ForecastApi for ApiClient {
        async fn forecast(&self, range: &WeekRange) -> Result<ForecastResult> {
            let request = ForecastRequest::from(range);
            let body = self.post_json("/forecast", &request).await?;

            let value = serde_json::from_str(&body)
                .map_err(|_| Error::shape(INVALID_PREDICTION_FORMAT))?;
            let result = parse_predictions(&value)?;

            debug!(
                num_weeks = request.num_weeks,
                predictions = result.len(),
                "Forecast received"
            );
            Ok(result)
        }
    }
}


#[cfg(all(test, feature = "client"))]
mod remote_tests {
    use crate::client::stub::{self, Reply};
    use crate::client::{ApiClient, ForecastApi};
    use crate::error::{ErrorKind, INVALID_PREDICTION_FORMAT};
    use crate::types::WeekRange;
    use serde_json::json;

    #[tokio::test]
    async fn test_forecast_sends_num_weeks_and_rounds() {
        let (url, recorded) = stub::serve(
            Reply::json(json!({ "predictions": [101.4, 149.6, 199.5, 180.2, 219.9] })),
            Reply::json(json!({ "schedule": [] })),
        )
        .await;
        let client = ApiClient::new(url).unwrap();

        let result = client.forecast(&WeekRange::new(1, 5).unwrap()).await.unwrap();

        assert_eq!(result.values(), &[101, 150, 200, 180, 220]);
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.forecast_bodies, vec![json!({ "num_weeks": 5 })]);
    }

    #[tokio::test]
    async fn test_forecast_http_error_keeps_status_and_body() {
        let (url, _) = stub::serve(
            Reply::status(503, "model unavailable"),
            Reply::json(json!({ "schedule": [] })),
        )
        .await;
        let client = ApiClient::new(url).unwrap();

        let err = client.forecast(&WeekRange::new(2, 3).unwrap()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(503));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_forecast_non_json_body_is_shape_error() {
        let (url, _) = stub::serve(
            Reply::status(200, "<html>ok</html>"),
            Reply::json(json!({ "schedule": [] })),
        )
        .await;
        let client = ApiClient::new(url).unwrap();

        let err = client.forecast(&WeekRange::new(1, 1).unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(err.to_string(), INVALID_PREDICTION_FORMAT);
    }
}

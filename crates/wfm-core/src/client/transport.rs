//! JSON/HTTP transport to the planning service.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::ServiceBanner;

/// HTTP client for the remote planning service
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client with no request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client, optionally bounding each request.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::Config("API URL cannot be empty".into()));
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the service banner from `GET /`.
    pub async fn health(&self) -> Result<ServiceBanner> {
        let url = format!("{}/", self.base_url);
        debug!("API request: GET {}", url);

        let resp = self.client.get(&url).send().await.map_err(Error::network)?;
        let body = Self::success_body(resp).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::shape(format!("Received invalid health response: {}", e)))
    }

    /// POST a JSON body and return the raw success body text.
    ///
    /// Non-2xx statuses become transport errors carrying the status and
    /// the response text; shape checks are left to the caller.
    pub(crate) async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("API request: POST {}", url);

        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(Error::network)?;

        Self::success_body(resp).await
    }

    async fn success_body(resp: reqwest::Response) -> Result<String> {
        let status = resp.status();
        if status.is_success() {
            resp.text().await.map_err(Error::network)
        } else {
            let error_text = resp.text().await.unwrap_or_default();
            Err(Error::http_status(status.as_u16(), error_text))
        }
    }
}

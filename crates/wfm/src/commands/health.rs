//! Planning service health check.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use wfm_core::client::ApiClient;

use crate::config::Config;

pub async fn execute(config: &Config) -> Result<()> {
    let client = ApiClient::with_timeout(config.api.url.as_str(), config.timeout())
        .context("Failed to create API client")?;
    debug!("Checking {}", client.base_url());

    match client.health().await {
        Ok(banner) => {
            println!("{} {} {}", "✓".green(), client.base_url(), banner.message.dimmed());
            Ok(())
        }
        Err(e) => {
            println!("{} {} {}", "✗".red(), client.base_url(), e.to_string().red());
            Err(e).context("Planning service is not reachable")
        }
    }
}

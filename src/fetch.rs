//! Contribution graph fetch.
//! One HTTP GET against the public profile contribution endpoint, returning
//! the raw markup. Non-success statuses are hard failures surfaced to the
//! caller; there is no retry policy.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::time::{Duration, Instant};

const CONTRIBUTIONS_URL_BASE: &str = "https://github.com/users";
const TIMEOUT_SECS: u64 = 30;

/// Fetches the raw contribution graph markup for a user.
pub async fn fetch_contributions(username: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("Failed to create HTTP client")?;

    let url = format!("{}/{}/contributions", CONTRIBUTIONS_URL_BASE, username);
    let start = Instant::now();

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to request {}", url))?;

    if !response.status().is_success() {
        bail!(
            "Failed to fetch contribution graph for '{}': status {}",
            username,
            response.status()
        );
    }

    let body = response
        .text()
        .await
        .context("Failed to read contribution graph response body")?;

    log::debug!("Fetched {} bytes in {:?}", body.len(), start.elapsed());
    Ok(body)
}

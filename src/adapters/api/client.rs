//! Match Data HTTP Client - REST Client with Retries
//!
//! Wraps reqwest with timeouts and exponential-backoff retries for the
//! read-only match-data backend.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for the match-data HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
  /// Base URL of the backend, without trailing slash.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum retries on transient errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
}

impl Default for ApiClientConfig {
  fn default() -> Self {
    Self {
      base_url: "https://www.salty-boy.com".to_string(),
      timeout: Duration::from_secs(10),
      max_retries: 3,
      retry_base_delay: Duration::from_millis(200),
    }
  }
}

/// HTTP client for the match-data backend.
pub struct ApiClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: ApiClientConfig,
}

impl ApiClient {
  /// Create a new client.
  pub fn new(config: ApiClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .pool_max_idle_per_host(2)
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  /// GET `path` and decode the JSON body.
  ///
  /// Returns `Ok(None)` on 404.
  pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
    let url = format!("{}{}", self.config.base_url, path);
    let request = self.http.get(&url);

    let Some(response) = self.execute_with_retry(request, path).await? else {
      return Ok(None);
    };

    let body = response
      .json::<T>()
      .await
      .with_context(|| format!("Failed to decode response from {path}"))?;
    Ok(Some(body))
  }

  /// Execute request with retries. `None` means the resource does not exist.
  async fn execute_with_retry(&self, request: RequestBuilder, path: &str) -> Result<Option<Response>> {
    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying request");
        sleep(delay).await;
      }

      let req = request.try_clone().context("Failed to clone request")?;

      match req.send().await {
        Ok(response) => match response.status() {
          StatusCode::OK => return Ok(Some(response)),
          StatusCode::NOT_FOUND => return Ok(None),
          StatusCode::TOO_MANY_REQUESTS => {
            warn!(path, "Rate limited by backend, backing off");
            last_error = Some(anyhow::anyhow!("Rate limited"));
          }
          status if status.is_server_error() => {
            warn!(status = %status, path, "Server error, retrying");
            last_error = Some(anyhow::anyhow!("Server error: {status}"));
          }
          status => {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("API error {status}: {body}"));
          }
        },
        Err(e) => {
          warn!(error = %e, attempt, path, "Request failed");
          last_error = Some(e.into());
        }
      }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
  }

  /// Base URL this client talks to.
  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }
}

//! Current Match Feed - MatchFeed over the match-data REST API
//!
//! Polls the backend's current-match endpoint. The backend answers
//! `null` (or 404) between matches; both map to `Ok(None)`. Fighter stats
//! are recomputed from the served match history before returning.

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::client::ApiClient;
use crate::domain::fighter::MatchData;
use crate::domain::stats::refresh_stats;
use crate::ports::match_feed::MatchFeed;

/// [`MatchFeed`] backed by the match-data HTTP API.
pub struct CurrentMatchFeed {
  /// HTTP client.
  client: ApiClient,
  /// Endpoint path, including any query string.
  path: String,
}

impl CurrentMatchFeed {
  /// Create a feed polling `path`, tagging requests with `client_version`.
  pub fn new(client: ApiClient, path: &str, client_version: &str) -> Self {
    let separator = if path.contains('?') { '&' } else { '?' };
    Self {
      client,
      path: format!("{path}{separator}saltyboy_version={client_version}"),
    }
  }

  /// Request path including the version query.
  pub fn path(&self) -> &str {
    &self.path
  }
}

#[async_trait]
impl MatchFeed for CurrentMatchFeed {
  #[instrument(skip(self), fields(base_url = %self.client.base_url()))]
  async fn current_match(&self) -> anyhow::Result<Option<MatchData>> {
    let Some(mut data) = self
      .client
      .get_json::<Option<MatchData>>(&self.path)
      .await?
      .flatten()
    else {
      debug!("No match open");
      return Ok(None);
    };

    refresh_stats(&mut data);
    Ok(Some(data))
  }

  async fn is_healthy(&self) -> bool {
    self.client.get_json::<serde_json::Value>(&self.path).await.is_ok()
  }
}

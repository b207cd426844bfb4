//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    name = %config.bot.name,
    api = %config.api.base_url,
    interval_ms = config.polling.interval_ms,
    dry_run = config.bot.dry_run,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(!config.bot.name.is_empty(), "Bot name must not be empty");

  // API validation
  anyhow::ensure!(
    config.api.base_url.starts_with("http://") || config.api.base_url.starts_with("https://"),
    "API base_url must be an http(s) URL, got {:?}",
    config.api.base_url
  );
  anyhow::ensure!(
    !config.api.base_url.ends_with('/'),
    "API base_url must not end with '/'"
  );
  anyhow::ensure!(
    config.api.current_match_path.starts_with('/'),
    "current_match_path must start with '/', got {:?}",
    config.api.current_match_path
  );
  anyhow::ensure!(
    config.api.timeout_seconds > 0,
    "API timeout_seconds must be positive"
  );

  // Polling validation
  anyhow::ensure!(
    config.polling.interval_ms >= 100,
    "polling interval_ms must be at least 100, got {}",
    config.polling.interval_ms
  );

  // Paths
  anyhow::ensure!(
    !config.settings.path.is_empty(),
    "Bet settings path must not be empty"
  );
  anyhow::ensure!(
    !config.persistence.data_dir.is_empty(),
    "Persistence data_dir must not be empty"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL: &str = r#"
    [bot]
    name = "salty"

    [api]
    base_url = "https://www.salty-boy.com"
  "#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config = parse_config(MINIMAL).unwrap();
    assert!(config.bot.dry_run);
    assert_eq!(config.bot.log_level, "info");
    assert_eq!(config.bot.rng_seed, None);
    assert_eq!(config.api.current_match_path, "/api/current_match_info/");
    assert_eq!(config.api.client_version, env!("CARGO_PKG_VERSION"));
    assert_eq!(config.polling.interval_ms, 5000);
    assert_eq!(config.settings.path, "bet_settings.toml");
    assert_eq!(config.paper.starting_balance, 400);
    assert!(config.metrics.enabled);
    assert_eq!(config.persistence.data_dir, "data");
  }

  #[test]
  fn test_rejects_bad_values() {
    let bad_url = MINIMAL.replace("https://www.salty-boy.com", "salty-boy.com");
    assert!(parse_config(&bad_url).is_err());

    let fast = format!("{MINIMAL}\n[polling]\ninterval_ms = 10\n");
    let err = parse_config(&fast).unwrap_err();
    assert!(err.to_string().contains("interval_ms"));
  }

  #[test]
  fn test_shipped_config_is_valid() {
    let content = include_str!("../../config.toml");
    let config = parse_config(content).unwrap();
    assert_eq!(config.bot.name, "salty-wager-bot");
  }
}

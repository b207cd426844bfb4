//! Configuration Module - TOML-based Bot Configuration
//!
//! Loads and validates configuration from `config.toml`. Bet policy is
//! deliberately not here: it lives in its own settings file so it can
//! be edited while the bot runs.

pub mod loader;

use std::time::Duration;

use serde::Deserialize;

/// Top-level bot configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the bot begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Bot identity and metadata.
  pub bot: BotConfig,
  /// Match-data backend endpoints.
  pub api: ApiConfig,
  /// Polling cadence.
  #[serde(default)]
  pub polling: PollingConfig,
  /// Bet settings file.
  #[serde(default)]
  pub settings: SettingsConfig,
  /// Paper wallet used in dry-run mode.
  #[serde(default)]
  pub paper: PaperConfig,
  /// Metrics and monitoring.
  #[serde(default)]
  pub metrics: MetricsConfig,
  /// Persistence configuration.
  #[serde(default)]
  pub persistence: PersistenceConfig,
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
  /// Human-readable bot name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Enable dry-run mode (paper wallet, no real bets).
  #[serde(default = "default_true")]
  pub dry_run: bool,
  /// Seed for the coin-flip strategy; entropy when absent.
  pub rng_seed: Option<u64>,
}

/// Match-data API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Backend base URL.
  pub base_url: String,
  /// Current match endpoint path.
  #[serde(default = "default_current_match_path")]
  pub current_match_path: String,
  /// Client version reported to the backend.
  #[serde(default = "default_client_version")]
  pub client_version: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Retries on transient errors.
  #[serde(default = "default_max_retries")]
  pub max_retries: u32,
}

impl ApiConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_seconds)
  }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
  /// Delay between betting cycles (milliseconds).
  #[serde(default = "default_interval_ms")]
  pub interval_ms: u64,
}

impl PollingConfig {
  pub fn interval(&self) -> Duration {
    Duration::from_millis(self.interval_ms)
  }
}

impl Default for PollingConfig {
  fn default() -> Self {
    Self {
      interval_ms: default_interval_ms(),
    }
  }
}

/// Bet settings file configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
  /// Path to the bet settings TOML file.
  #[serde(default = "default_settings_path")]
  pub path: String,
}

impl Default for SettingsConfig {
  fn default() -> Self {
    Self {
      path: default_settings_path(),
    }
  }
}

/// Paper wallet configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperConfig {
  /// Balance the paper wallet starts with.
  #[serde(default = "default_starting_balance")]
  pub starting_balance: u64,
}

impl Default for PaperConfig {
  fn default() -> Self {
    Self {
      starting_balance: default_starting_balance(),
    }
  }
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Enable Prometheus metrics export.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Metrics server bind address.
  #[serde(default = "default_metrics_addr")]
  pub bind_address: String,
  /// Health check endpoint port.
  #[serde(default = "default_health_port")]
  pub health_port: u16,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      bind_address: default_metrics_addr(),
      health_port: default_health_port(),
    }
  }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory for the decision log.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_current_match_path() -> String {
  "/api/current_match_info/".to_string()
}

fn default_client_version() -> String {
  env!("CARGO_PKG_VERSION").to_string()
}

fn default_timeout() -> u64 {
  10
}

fn default_max_retries() -> u32 {
  3
}

fn default_interval_ms() -> u64 {
  5000
}

fn default_settings_path() -> String {
  "bet_settings.toml".to_string()
}

fn default_starting_balance() -> u64 {
  400
}

fn default_metrics_addr() -> String {
  "0.0.0.0:9090".to_string()
}

fn default_health_port() -> u16 {
  8080
}

fn default_data_dir() -> String {
  "data".to_string()
}

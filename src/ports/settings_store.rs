//! Settings Store Port - User Bet Policy Interface

use async_trait::async_trait;

use crate::domain::settings::BetSettings;

/// Trait for bet settings providers.
///
/// Implementors must fill any field the stored record lacks with its
/// default, so callers always receive a complete [`BetSettings`].
#[async_trait]
pub trait SettingsStore: Send + Sync + 'static {
  /// Load the current settings.
  ///
  /// # Errors
  /// Returns error only when no usable settings exist at all.
  async fn load(&self) -> anyhow::Result<BetSettings>;
}

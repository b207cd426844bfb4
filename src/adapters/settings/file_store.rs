//! File Settings Store - TOML Bet Settings with Change Detection
//!
//! Reads bet settings from a TOML file on every `load`, but only parses
//! when the content hash changes. A missing file yields the defaults; a
//! file that fails to parse keeps the last good settings so a half-saved
//! edit never stops the bot.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::domain::settings::BetSettings;
use crate::ports::settings_store::SettingsStore;

#[derive(Debug, Clone)]
struct Cached {
    hash: u64,
    settings: BetSettings,
}

/// [`SettingsStore`] backed by a TOML file with camelCase keys.
#[derive(Debug)]
pub struct FileSettingsStore {
    /// Path to the settings file.
    path: PathBuf,
    /// Last successfully parsed content.
    cache: RwLock<Option<Cached>>,
}

fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

impl FileSettingsStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: RwLock::new(None),
        }
    }

    /// Write `settings` to the file, replacing its content.
    pub async fn save(&self, settings: &BetSettings) -> Result<()> {
        let content = toml::to_string_pretty(settings).context("Failed to serialize bet settings")?;
        tokio::fs::write(&self.path, &content)
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<BetSettings> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file, using defaults");
                return Ok(BetSettings::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let hash = content_hash(&content);
        if let Some(cached) = self.cache.read().await.as_ref().filter(|c| c.hash == hash) {
            return Ok(cached.settings.clone());
        }

        let mut cache = self.cache.write().await;
        match toml::from_str::<BetSettings>(&content) {
            Ok(settings) => {
                info!(bet_mode = %settings.bet_mode, "Bet settings loaded");
                *cache = Some(Cached {
                    hash,
                    settings: settings.clone(),
                });
                Ok(settings)
            }
            Err(e) => match cache.as_ref() {
                Some(previous) => {
                    warn!(error = %e, "Failed to parse bet settings, keeping previous");
                    Ok(previous.settings.clone())
                }
                None => Err(e).context("Failed to parse bet settings"),
            },
        }
    }
}

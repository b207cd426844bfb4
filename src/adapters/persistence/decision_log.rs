//! Decision Log - Append-only JSONL Decision Records
//!
//! Every decision is appended to a daily file `decisions/YYYY-MM-DD.jsonl`
//! and the newest one is also written to `latest.json` atomically
//! (tmp file, then rename), so the last known decision can be restored
//! without scanning the log.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

use crate::ports::journal::{DecisionJournal, DecisionRecord};

/// JSONL decision journal with daily rotation.
pub struct DecisionLog {
    /// Directory holding the daily JSONL files.
    decisions_dir: PathBuf,
    /// Path to latest.json.
    latest_path: PathBuf,
    /// Temporary path for atomic writes.
    tmp_path: PathBuf,
}

impl DecisionLog {
    /// Create a decision log in the given data directory.
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        let decisions_dir = dir.join("decisions");

        fs::create_dir_all(&decisions_dir)
            .await
            .context("Failed to create decisions directory")?;

        Ok(Self {
            decisions_dir,
            latest_path: dir.join("latest.json"),
            tmp_path: dir.join("latest.json.tmp"),
        })
    }

    async fn append(&self, record: &DecisionRecord) -> Result<()> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let path = self.decisions_dir.join(format!("{date}.jsonl"));

        let mut json = serde_json::to_string(record).context("Failed to serialize decision")?;
        json.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .context("Failed to open decision log file")?;

        file.write_all(json.as_bytes())
            .await
            .context("Failed to write decision record")?;
        file.flush().await.context("Failed to flush decision log")?;

        Ok(())
    }

    async fn write_latest(&self, record: &DecisionRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record).context("Failed to serialize decision")?;

        fs::write(&self.tmp_path, &json)
            .await
            .context("Failed to write tmp latest file")?;
        fs::rename(&self.tmp_path, &self.latest_path)
            .await
            .context("Failed to rename latest file")?;

        Ok(())
    }

    /// Load every decision from every daily file, oldest first.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> Result<Vec<DecisionRecord>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.decisions_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "jsonl") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                match serde_json::from_str::<DecisionRecord>(line) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        warn!(
                            file = %path.display(),
                            error = %e,
                            "Skipping malformed decision record"
                        );
                    }
                }
            }
        }

        records.sort_by_key(|r| r.timestamp_ms);
        info!(count = records.len(), "Loaded decision records");
        Ok(records)
    }
}

#[async_trait]
impl DecisionJournal for DecisionLog {
    #[instrument(skip(self, record), fields(red = %record.fighter_red, blue = %record.fighter_blue))]
    async fn record(&self, record: &DecisionRecord) -> Result<()> {
        self.append(record).await?;
        self.write_latest(record).await?;
        debug!(wager = %record.wager, "Decision recorded");
        Ok(())
    }

    async fn latest(&self) -> Result<Option<DecisionRecord>> {
        if !self.latest_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.latest_path)
            .await
            .context("Failed to read latest decision")?;
        let record = serde_json::from_str(&json).context("Failed to parse latest decision")?;
        Ok(Some(record))
    }

    async fn is_healthy(&self) -> bool {
        fs::metadata(&self.decisions_dir)
            .await
            .is_ok_and(|m| m.is_dir())
    }
}

//! Append-only signal log.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use crate::error::StorageError;
use crate::models::{Action, ConfidenceBand, ScoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    pub timeframe: String,
    pub action: Action,
    pub confidence_band: ConfidenceBand,
    pub technical_score: usize,
    pub fundamental_score: usize,
    pub composite_score01: f64,
    pub price: Option<f64>,
    #[serde(default)]
    pub vetoes: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl SignalRecord {
    pub fn from_result(
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        result: &ScoreResult,
        price: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            action: result.action,
            confidence_band: result.confidence_band,
            technical_score: result.technical_score,
            fundamental_score: result.fundamental_score,
            composite_score01: result.composite_score01,
            price,
            vetoes: result.vetoes.clone(),
            timestamp,
        }
    }
}

#[async_trait]
pub trait SignalLog: Send + Sync {
    async fn record(&self, record: &SignalRecord) -> Result<(), StorageError>;

    /// Up to `limit` most recent records, oldest first.
    async fn recent(&self, limit: usize) -> Result<Vec<SignalRecord>, StorageError>;
}

/// One JSON object per line.
pub struct JsonlSignalLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlSignalLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SignalLog for JsonlSignalLog {
    async fn record(&self, record: &SignalRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SignalRecord>, StorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<SignalRecord> = Vec::new();
        for (lineno, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    path = %self.path.display(),
                    line = lineno + 1,
                    error = %e,
                    "Skipping unreadable signal log line"
                ),
            }
        }

        let skip = records.len().saturating_sub(limit);
        Ok(records.split_off(skip))
    }
}

#[derive(Default)]
pub struct MemorySignalLog {
    records: RwLock<Vec<SignalRecord>>,
}

impl MemorySignalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SignalLog for MemorySignalLog {
    async fn record(&self, record: &SignalRecord) -> Result<(), StorageError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SignalRecord>, StorageError> {
        let records = self.records.read().await;
        let skip = records.len().saturating_sub(limit);
        Ok(records[skip..].to_vec())
    }
}

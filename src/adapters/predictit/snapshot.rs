//! Snapshot Source - File-backed Market Data
//!
//! Reads a saved copy of the PredictIt all-markets response from disk.
//! Useful for offline runs, reproducing a past scan, and tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, instrument};

use crate::domain::market::MarketQuote;
use crate::ports::market_source::MarketSource;

use super::group_by_market;
use super::types::MarketDataResponse;

/// Market source reading a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
  /// Path to the saved response.
  path: PathBuf,
}

impl SnapshotSource {
  /// Create a source for the given file.
  pub fn new(path: impl AsRef<Path>) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
    }
  }
}

#[async_trait]
impl MarketSource for SnapshotSource {
  #[instrument(skip(self), fields(path = %self.path.display()))]
  async fn fetch_markets(&self) -> Result<Vec<MarketQuote>> {
    let content = fs::read_to_string(&self.path)
      .await
      .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;

    let response: MarketDataResponse = serde_json::from_str(&content)
      .with_context(|| format!("Failed to parse snapshot: {}", self.path.display()))?;

    let quotes = group_by_market(response);
    info!(markets = quotes.len(), "Loaded market snapshot");
    Ok(quotes)
  }

  fn describe(&self) -> String {
    format!("snapshot {}", self.path.display())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_missing_snapshot_fails() {
    let source = SnapshotSource::new("does/not/exist.json");
    let err = source.fetch_markets().await.unwrap_err();
    assert!(err.to_string().contains("Failed to read snapshot"));
  }
}

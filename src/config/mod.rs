//! Configuration Module - TOML-based Scanner Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Endpoints and scan options are externalized here. The fee rate and
//! search bound are exchange rules and live in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the first scan.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Application identity and output.
  pub app: AppSection,
  /// Where market data comes from.
  pub source: SourceConfig,
  /// Market screening options.
  #[serde(default)]
  pub scanner: ScannerConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable application name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Report format written to stdout.
  #[serde(default)]
  pub output: OutputFormat,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// Multi-line human-readable blocks.
  #[default]
  Text,
  /// One JSON object per line.
  Json,
}

/// Market data source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
  /// Live PredictIt market data API.
  Api,
  /// A saved copy of the API response on disk.
  Snapshot,
}

/// Market data source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
  /// Which source to use.
  pub kind: SourceKind,
  /// PredictIt all-markets endpoint.
  #[serde(default = "default_api_url")]
  pub api_url: String,
  /// Snapshot file path (required for `kind = "snapshot"`).
  pub snapshot_path: Option<String>,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Maximum retries on transient errors.
  #[serde(default = "default_max_retries")]
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff), milliseconds.
  #[serde(default = "default_retry_delay")]
  pub retry_base_delay_ms: u64,
}

/// Market screening configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
  /// Markets with fewer priced contracts are skipped.
  #[serde(default = "default_min_contracts")]
  pub min_contracts: usize,
  /// Also report markets with no arbitrage at the optimal ratio.
  #[serde(default)]
  pub report_unprofitable: bool,
}

impl Default for ScannerConfig {
  fn default() -> Self {
    Self {
      min_contracts: default_min_contracts(),
      report_unprofitable: false,
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_api_url() -> String {
  "https://www.predictit.org/api/marketdata/all/".to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_max_retries() -> u32 {
  3
}

fn default_retry_delay() -> u64 {
  500
}

fn default_min_contracts() -> usize {
  2
}

//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};

use super::{AppConfig, SourceKind};

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

  parse_config(&content)
}

/// Parse and validate configuration from TOML text.
///
/// # Errors
/// Fails on malformed TOML or invalid values.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A usable source (URL or snapshot path)
/// - Positive timeouts
/// - At least two contracts per market
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.app.name.is_empty(),
    "app.name must not be empty"
  );

  // Source validation
  match config.source.kind {
    SourceKind::Api => {
      anyhow::ensure!(
        config.source.api_url.starts_with("http://")
          || config.source.api_url.starts_with("https://"),
        "source.api_url must be an http(s) URL, got {:?}",
        config.source.api_url
      );
    }
    SourceKind::Snapshot => {
      anyhow::ensure!(
        config
          .source
          .snapshot_path
          .as_deref()
          .is_some_and(|p| !p.is_empty()),
        "source.snapshot_path is required when source.kind = \"snapshot\""
      );
    }
  }
  anyhow::ensure!(
    config.source.timeout_seconds > 0,
    "source.timeout_seconds must be positive"
  );
  anyhow::ensure!(
    config.source.max_retries <= 10,
    "source.max_retries must be at most 10, got {}",
    config.source.max_retries
  );

  // Scanner validation
  anyhow::ensure!(
    config.scanner.min_contracts >= 2,
    "scanner.min_contracts must be at least 2, got {}",
    config.scanner.min_contracts
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::OutputFormat;

  const MINIMAL: &str = r#"
    [app]
    name = "arb-finder"

    [source]
    kind = "api"
  "#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_load_shipped_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml");
    let config = load_config(path).unwrap();
    assert!(!config.app.name.is_empty());
    assert!(config.scanner.min_contracts >= 2);
  }

  #[test]
  fn test_defaults_applied() {
    let config = parse_config(MINIMAL).unwrap();
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.app.output, OutputFormat::Text);
    assert_eq!(
      config.source.api_url,
      "https://www.predictit.org/api/marketdata/all/"
    );
    assert_eq!(config.source.timeout_seconds, 30);
    assert_eq!(config.source.max_retries, 3);
    assert_eq!(config.scanner.min_contracts, 2);
    assert!(!config.scanner.report_unprofitable);
  }

  #[test]
  fn test_snapshot_requires_path() {
    let toml = r#"
      [app]
      name = "arb-finder"

      [source]
      kind = "snapshot"
    "#;
    let err = parse_config(toml).unwrap_err();
    assert!(err.to_string().contains("snapshot_path"));
  }

  #[test]
  fn test_min_contracts_below_two_rejected() {
    let toml = format!("{MINIMAL}\n[scanner]\nmin_contracts = 1\n");
    assert!(parse_config(&toml).is_err());
  }

  #[test]
  fn test_json_output_parsed() {
    let toml = r#"
      [app]
      name = "arb-finder"
      output = "json"

      [source]
      kind = "snapshot"
      snapshot_path = "data/markets.json"
    "#;
    let config = parse_config(toml).unwrap();
    assert_eq!(config.app.output, OutputFormat::Json);
    assert_eq!(config.source.kind, SourceKind::Snapshot);
  }
}

//! PredictIt Arbitrage Finder — Entry Point
//!
//! Runs a single scan of every PredictIt market and prints the
//! opportunities. Recommendations only: nothing is ever traded.
//!
//! Wiring sequence:
//! 1. Load config (path from first argument, default `config.toml`)
//! 2. Init tracing (JSON structured logging to stderr)
//! 3. Create the market source (live API or snapshot file)
//! 4. Run the MarketScanner (fetch → screen → evaluate in parallel)
//! 5. Write reports to stdout in the configured format

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use predictit_arb_finder::adapters::predictit::{
  PredictItClient, PredictItClientConfig, SnapshotSource,
};
use predictit_arb_finder::adapters::report::{JsonLinesReporter, TextReporter};
use predictit_arb_finder::config::{self, AppConfig, OutputFormat, SourceKind};
use predictit_arb_finder::domain::ScanOutcome;
use predictit_arb_finder::ports::market_source::MarketSource;
use predictit_arb_finder::ports::report_sink::ReportSink;
use predictit_arb_finder::usecases::MarketScanner;

#[tokio::main]
async fn main() -> Result<()> {
  // ── 1. Load configuration ───────────────────────────────
  let config_path = std::env::args()
    .nth(1)
    .unwrap_or_else(|| "config.toml".to_string());
  let config = config::loader::load_config(&config_path)
    .context("Failed to load configuration")?;

  // ── 2. Initialize structured JSON logging ───────────────
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level)),
    )
    .with_writer(std::io::stderr)
    .json()
    .init();

  info!(
    name = %config.app.name,
    version = env!("CARGO_PKG_VERSION"),
    config = %config_path,
    source = ?config.source.kind,
    min_contracts = config.scanner.min_contracts,
    output = ?config.app.output,
    "Starting PredictIt arbitrage finder"
  );

  // ── 3. Create market source and scan ────────────────────
  match config.source.kind {
    SourceKind::Api => {
      let client = PredictItClient::new(PredictItClientConfig::from(&config.source))
        .context("Failed to create PredictIt client")?;
      run_scan(client, &config).await
    }
    SourceKind::Snapshot => {
      let path = config
        .source
        .snapshot_path
        .as_deref()
        .context("source.snapshot_path missing")?;
      run_scan(SnapshotSource::new(path), &config).await
    }
  }
}

/// Scan once and write the outcome to stdout.
async fn run_scan<S: MarketSource>(source: S, config: &AppConfig) -> Result<()> {
  let scanner = MarketScanner::new(Arc::new(source), &config.scanner);
  let outcome = scanner.scan().await?;

  if !outcome.failures.is_empty() {
    warn!(
      failed = outcome.failures.len(),
      "Some markets could not be evaluated"
    );
  }

  // ── 4. Present results ──────────────────────────────────
  let stdout = std::io::stdout().lock();
  match config.app.output {
    OutputFormat::Text => publish(TextReporter::new(stdout), &outcome),
    OutputFormat::Json => publish(JsonLinesReporter::new(stdout), &outcome),
  }?;

  info!(
    scan_id = %outcome.scan_id,
    opportunities = outcome.reports.len(),
    "Done"
  );
  Ok(())
}

fn publish<R: ReportSink>(mut sink: R, outcome: &ScanOutcome) -> Result<()> {
  sink.publish_outcome(outcome)
}

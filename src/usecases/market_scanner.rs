//! Market Scanner - Exchange-wide Arbitrage Screening
//!
//! The main use case:
//! 1. Fetches every market from the `MarketSource`
//! 2. Skips markets with too few priced contracts
//! 3. Evaluates the rest in parallel (ratio, profit, allocation)
//! 4. Keeps markets with a positive guaranteed profit at the ratio
//! 5. Records per-market failures instead of aborting the scan

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::ScannerConfig;
use crate::domain::allocation::evaluate_market;
use crate::domain::market::{ArbitrageReport, MarketFailure, MarketQuote, ScanOutcome};
use crate::ports::market_source::MarketSource;

/// Scanner orchestrating fetch and evaluation.
pub struct MarketScanner<S: MarketSource> {
  /// Market data source.
  source: Arc<S>,
  /// Markets with fewer priced contracts are skipped.
  min_contracts: usize,
  /// Also report markets without arbitrage.
  report_unprofitable: bool,
}

impl<S: MarketSource> MarketScanner<S> {
  /// Create a new scanner.
  pub fn new(source: Arc<S>, config: &ScannerConfig) -> Self {
    Self {
      source,
      min_contracts: config.min_contracts.max(2),
      report_unprofitable: config.report_unprofitable,
    }
  }

  /// Fetch all markets and screen them.
  ///
  /// Fails only if the source fails; per-market errors end up in
  /// `ScanOutcome::failures`.
  #[instrument(skip(self), name = "market_scan")]
  pub async fn scan(&self) -> Result<ScanOutcome> {
    let markets = self
      .source
      .fetch_markets()
      .await
      .with_context(|| format!("Failed to fetch markets from {}", self.source.describe()))?;

    let min_contracts = self.min_contracts;
    let report_unprofitable = self.report_unprofitable;

    tokio::task::spawn_blocking(move || {
      screen_markets(markets, min_contracts, report_unprofitable)
    })
    .await
    .context("Market evaluation task panicked")
  }

  /// Screen an already fetched set of markets.
  pub fn screen(&self, markets: Vec<MarketQuote>) -> ScanOutcome {
    screen_markets(markets, self.min_contracts, self.report_unprofitable)
  }
}

fn screen_markets(
  markets: Vec<MarketQuote>,
  min_contracts: usize,
  report_unprofitable: bool,
) -> ScanOutcome {
  let scan_id = Uuid::new_v4();
  let started_at = Utc::now();
  let start = Instant::now();
  let markets_seen = markets.len();

  let (eligible, skipped): (Vec<_>, Vec<_>) = markets
    .into_iter()
    .partition(|m| m.contract_count() >= min_contracts);

  for market in &skipped {
    debug!(
      market = %market.name,
      contracts = market.contract_count(),
      "Skipping market with too few contracts"
    );
  }

  let evaluated: Vec<_> = eligible
    .into_par_iter()
    .map(|market| {
      let result = evaluate_market(&market.no_prices);
      (market, result)
    })
    .collect();

  let mut reports = Vec::new();
  let mut failures = Vec::new();

  for (market, result) in evaluated {
    match result {
      Ok(evaluation) if evaluation.is_opportunity() || report_unprofitable => {
        if evaluation.is_opportunity() {
          info!(
            market = %market.name,
            profit_at_ratio = evaluation.profit_at_ratio,
            actionable = evaluation.is_actionable(),
            "Arbitrage opportunity"
          );
        }
        reports.push(ArbitrageReport {
          market: market.name,
          prices: market.no_prices,
          evaluation,
        });
      }
      Ok(evaluation) => {
        debug!(
          market = %market.name,
          profit_at_ratio = evaluation.profit_at_ratio,
          "No arbitrage"
        );
      }
      Err(error) => {
        warn!(
          market = %market.name,
          kind = error.kind(),
          error = %error,
          "Market evaluation failed"
        );
        failures.push(MarketFailure {
          market: market.name,
          error,
        });
      }
    }
  }

  info!(
    %scan_id,
    markets_seen,
    skipped = skipped.len(),
    opportunities = reports.len(),
    failed = failures.len(),
    elapsed_ms = start.elapsed().as_millis(),
    "Scan complete"
  );

  ScanOutcome {
    scan_id,
    started_at,
    markets_seen,
    markets_skipped: skipped.len(),
    reports,
    failures,
  }
}

//! Market and scan report types.
//!
//! `MarketQuote` is what the data side hands the core; the report types
//! are what the core hands the presentation side. All are plain data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::allocation::MarketEvaluation;
use super::error::ArbError;

/// Current "no" prices for every contract of one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Market title as published by the exchange.
    pub name: String,
    /// Best "buy no" price per contract, missing quotes already dropped.
    pub no_prices: Vec<f64>,
}

impl MarketQuote {
    /// Creates a quote.
    pub fn new(name: impl Into<String>, no_prices: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            no_prices,
        }
    }

    /// Number of priced contracts.
    pub fn contract_count(&self) -> usize {
        self.no_prices.len()
    }
}

/// Evaluation of one market, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageReport {
    /// Market title.
    pub market: String,
    /// Prices the evaluation was computed from.
    pub prices: Vec<f64>,
    /// Ratio, profit at ratio and whole-share allocation.
    #[serde(flatten)]
    pub evaluation: MarketEvaluation,
}

/// A market the core refused to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketFailure {
    /// Market title.
    pub market: String,
    /// Why evaluation failed.
    pub error: ArbError,
}

/// Result of screening a full set of markets.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Unique id for log correlation.
    pub scan_id: Uuid,
    /// When the scan started.
    pub started_at: DateTime<Utc>,
    /// Markets returned by the source.
    pub markets_seen: usize,
    /// Markets skipped for having too few priced contracts.
    pub markets_skipped: usize,
    /// Markets worth presenting.
    pub reports: Vec<ArbitrageReport>,
    /// Markets whose evaluation failed.
    pub failures: Vec<MarketFailure>,
}

impl ScanOutcome {
    /// Reports that carry a whole-share allocation.
    pub fn actionable(&self) -> impl Iterator<Item = &ArbitrageReport> {
        self.reports.iter().filter(|r| r.evaluation.is_actionable())
    }
}

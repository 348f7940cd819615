//! Market Source Port - Market Data Interface
//!
//! Defines the trait for retrieving the current "no" prices of every
//! market on a prediction market platform (e.g., the PredictIt API).

use async_trait::async_trait;

use crate::domain::market::MarketQuote;

/// Trait for market data providers.
///
/// Implementors fetch a full snapshot of the exchange and hand back one
/// `MarketQuote` per market, contracts in exchange order, with missing
/// quotes already dropped. Single-contract markets may be included; the
/// scanner filters them.
#[async_trait]
pub trait MarketSource: Send + Sync + 'static {
  /// Fetch the current prices of every market.
  async fn fetch_markets(&self) -> anyhow::Result<Vec<MarketQuote>>;

  /// Human-readable description of where the data comes from.
  fn describe(&self) -> String;
}

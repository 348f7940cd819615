//! PredictIt Market Data Adapter
//!
//! Implements `MarketSource` for PredictIt, either live over HTTP or
//! from a saved response on disk. Both share the same response types and
//! the same reshaping into one `MarketQuote` per market.
//!
//! Sub-modules:
//! - `client`: HTTP client with timeouts and retries
//! - `snapshot`: File-backed source for offline runs
//! - `types`: API response type definitions

pub mod client;
pub mod snapshot;
pub mod types;

use indexmap::IndexMap;

use crate::domain::market::MarketQuote;

use self::types::MarketDataResponse;

pub use client::{PredictItClient, PredictItClientConfig};
pub use snapshot::SnapshotSource;

/// Reshape an API response into one quote per market.
///
/// Contracts are grouped by market name in first-seen order and keep
/// their order within the market. Contracts without a "buy no" quote are
/// dropped.
pub fn group_by_market(response: MarketDataResponse) -> Vec<MarketQuote> {
  let mut grouped: IndexMap<String, Vec<f64>> = IndexMap::new();

  for market in response.markets {
    let prices = grouped.entry(market.name).or_default();
    prices.extend(
      market
        .contracts
        .iter()
        .filter_map(|c| c.best_buy_no_cost)
        .filter(|p| p.is_finite()),
    );
  }

  grouped
    .into_iter()
    .map(|(name, no_prices)| MarketQuote::new(name, no_prices))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const RESPONSE: &str = r#"{
    "markets": [
      {
        "id": 1,
        "name": "Who will win the primary?",
        "contracts": [
          {"id": 11, "name": "A", "bestBuyNoCost": 0.55},
          {"id": 12, "name": "B", "bestBuyNoCost": null},
          {"id": 13, "name": "C", "bestBuyNoCost": 0.70}
        ]
      },
      {
        "id": 2,
        "name": "Will the bill pass?",
        "contracts": [{"id": 21, "bestBuyNoCost": 0.40}]
      },
      {
        "id": 3,
        "name": "Who will win the primary?",
        "contracts": [{"id": 31, "bestBuyNoCost": 0.62}]
      }
    ]
  }"#;

  #[test]
  fn test_group_by_market_drops_missing_prices() {
    let response: MarketDataResponse = serde_json::from_str(RESPONSE).unwrap();
    let quotes = group_by_market(response);

    assert_eq!(quotes.len(), 2);
    assert_eq!(quotes[0].name, "Who will win the primary?");
    assert_eq!(quotes[0].no_prices, vec![0.55, 0.70, 0.62]);
    assert_eq!(quotes[1].name, "Will the bill pass?");
    assert_eq!(quotes[1].no_prices, vec![0.40]);
  }

  #[test]
  fn test_empty_response() {
    let response: MarketDataResponse = serde_json::from_str("{}").unwrap();
    assert!(group_by_market(response).is_empty());
  }
}

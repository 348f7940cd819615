//! PredictIt API Response Types
//!
//! Serialization types for `GET /api/marketdata/all/`. Only the fields
//! the scanner reads are required; everything else is optional so that
//! API additions or nulls never break deserialization.

use serde::{Deserialize, Serialize};

/// Top-level response: every open market.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketDataResponse {
  /// All markets on the exchange.
  #[serde(default)]
  pub markets: Vec<ApiMarket>,
}

/// A single market and its contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMarket {
  /// Market ID.
  #[serde(default)]
  pub id: u64,
  /// Full market title.
  pub name: String,
  /// Abbreviated title.
  #[serde(default)]
  pub short_name: Option<String>,
  /// Market page URL.
  #[serde(default)]
  pub url: Option<String>,
  /// "Open" or "Closed".
  #[serde(default)]
  pub status: Option<String>,
  /// Server timestamp of the quote.
  #[serde(default)]
  pub time_stamp: Option<String>,
  /// Contracts (mutually exclusive outcomes).
  #[serde(default)]
  pub contracts: Vec<ApiContract>,
}

/// A single contract's quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContract {
  /// Contract ID.
  #[serde(default)]
  pub id: u64,
  /// Contract (outcome) name.
  #[serde(default)]
  pub name: Option<String>,
  /// "Open" or "Closed".
  #[serde(default)]
  pub status: Option<String>,
  /// Lowest ask for a "yes" share.
  #[serde(default)]
  pub best_buy_yes_cost: Option<f64>,
  /// Lowest ask for a "no" share. Null when nobody is selling.
  #[serde(default)]
  pub best_buy_no_cost: Option<f64>,
  /// Highest bid for a "yes" share.
  #[serde(default)]
  pub best_sell_yes_cost: Option<f64>,
  /// Highest bid for a "no" share.
  #[serde(default)]
  pub best_sell_no_cost: Option<f64>,
  /// Last traded "yes" price.
  #[serde(default)]
  pub last_trade_price: Option<f64>,
}

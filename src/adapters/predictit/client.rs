//! PredictIt HTTP Client - Retrying Market Data Client
//!
//! Wraps reqwest with timeouts and exponential-backoff retries for the
//! public PredictIt market data endpoint. No authentication is needed.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::config::SourceConfig;
use crate::domain::market::MarketQuote;
use crate::ports::market_source::MarketSource;

use super::group_by_market;
use super::types::MarketDataResponse;

/// Configuration for the PredictIt HTTP client.
#[derive(Debug, Clone)]
pub struct PredictItClientConfig {
  /// All-markets endpoint URL.
  pub url: String,
  /// Request timeout.
  pub timeout: Duration,
  /// Maximum retries on transient errors.
  pub max_retries: u32,
  /// Base delay between retries (exponential backoff).
  pub retry_base_delay: Duration,
}

impl Default for PredictItClientConfig {
  fn default() -> Self {
    Self {
      url: "https://www.predictit.org/api/marketdata/all/".to_string(),
      timeout: Duration::from_secs(30),
      max_retries: 3,
      retry_base_delay: Duration::from_millis(500),
    }
  }
}

impl From<&SourceConfig> for PredictItClientConfig {
  fn from(source: &SourceConfig) -> Self {
    Self {
      url: source.api_url.clone(),
      timeout: Duration::from_secs(source.timeout_seconds),
      max_retries: source.max_retries,
      retry_base_delay: Duration::from_millis(source.retry_base_delay_ms),
    }
  }
}

/// HTTP client for the PredictIt market data API.
pub struct PredictItClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: PredictItClientConfig,
}

impl PredictItClient {
  /// Create a new client.
  pub fn new(config: PredictItClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .user_agent(concat!("predictit-arb-finder/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  /// Fetch the raw all-markets response, retrying transient failures.
  #[instrument(skip(self), fields(url = %self.config.url))]
  pub async fn fetch_all(&self) -> Result<MarketDataResponse> {
    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = self.config.retry_base_delay * 2u32.pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying request");
        sleep(delay).await;
      }

      match self.http.get(&self.config.url).send().await {
        Ok(response) => match response.status() {
          StatusCode::OK => {
            return response
              .json::<MarketDataResponse>()
              .await
              .context("Failed to decode PredictIt market data");
          }
          StatusCode::TOO_MANY_REQUESTS => {
            warn!("Rate limited by PredictIt API, backing off");
            last_error = Some(anyhow::anyhow!("Rate limited"));
          }
          status if status.is_server_error() => {
            warn!(status = %status, "Server error, retrying");
            last_error = Some(anyhow::anyhow!("Server error: {status}"));
          }
          status => {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("API error {status}: {body}"));
          }
        },
        Err(e) => {
          warn!(error = %e, attempt, "Request failed");
          last_error = Some(e.into());
        }
      }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Max retries exceeded")))
  }
}

#[async_trait]
impl MarketSource for PredictItClient {
  async fn fetch_markets(&self) -> Result<Vec<MarketQuote>> {
    let response = self.fetch_all().await?;
    let raw_markets = response.markets.len();
    let quotes = group_by_market(response);

    info!(
      raw_markets,
      markets = quotes.len(),
      "Fetched PredictIt market data"
    );
    Ok(quotes)
  }

  fn describe(&self) -> String {
    format!("PredictIt API ({})", self.config.url)
  }
}

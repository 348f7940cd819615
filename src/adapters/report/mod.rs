//! Report Adapters
//!
//! Implementations of `ReportSink` writing to any `std::io::Write`.
//!
//! - `text`: Human-readable blocks, one per market
//! - `json`: One JSON object per line

pub mod json;
pub mod text;

pub use json::JsonLinesReporter;
pub use text::TextReporter;

/// Format a float vector the way the text report shows it: `[0.55, 0.62]`.
pub(crate) fn format_vector(values: &[f64]) -> String {
  let items: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
  format!("[{}]", items.join(", "))
}

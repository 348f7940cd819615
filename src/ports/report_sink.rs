//! Report Sink Port - Presentation Interface
//!
//! Defines the trait for presenting scan results. Implementations decide
//! the format (human-readable text, JSON lines, ...).

use crate::domain::market::{ArbitrageReport, MarketFailure, ScanOutcome};

/// Trait for presenting evaluated markets.
pub trait ReportSink {
  /// Present a single market report.
  fn publish(&mut self, report: &ArbitrageReport) -> anyhow::Result<()>;

  /// Present a market that could not be evaluated.
  fn publish_failure(&mut self, failure: &MarketFailure) -> anyhow::Result<()>;

  /// Present the scan totals after all reports.
  fn summarize(&mut self, outcome: &ScanOutcome) -> anyhow::Result<()>;

  /// Present every report and failure of a scan, then its summary.
  fn publish_outcome(&mut self, outcome: &ScanOutcome) -> anyhow::Result<()> {
    for report in &outcome.reports {
      self.publish(report)?;
    }
    for failure in &outcome.failures {
      self.publish_failure(failure)?;
    }
    self.summarize(outcome)
  }
}

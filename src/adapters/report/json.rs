//! JSON Lines Reporter - Machine-readable Output
//!
//! Writes one JSON object per report and per failed market, then a
//! summary object. Every line carries a `type` field (`"report"`,
//! `"failure"` or `"summary"`) and the scan id.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::market::{ArbitrageReport, MarketFailure, ScanOutcome};
use crate::ports::report_sink::ReportSink;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Line<'a> {
  Report {
    scan_id: Option<Uuid>,
    #[serde(flatten)]
    report: &'a ArbitrageReport,
  },
  Failure {
    scan_id: Option<Uuid>,
    market: &'a str,
    kind: &'static str,
    error: String,
  },
  Summary {
    scan_id: Uuid,
    started_at: String,
    markets_seen: usize,
    markets_skipped: usize,
    failed: usize,
    opportunities: usize,
    actionable: usize,
  },
}

/// Writes reports as JSON lines.
pub struct JsonLinesReporter<W: Write> {
  out: W,
  scan_id: Option<Uuid>,
}

impl<W: Write> JsonLinesReporter<W> {
  /// Create a reporter writing to `out`.
  pub fn new(out: W) -> Self {
    Self { out, scan_id: None }
  }

  /// Consume the reporter and return the writer.
  pub fn into_inner(self) -> W {
    self.out
  }

  fn write_line(&mut self, line: &Line<'_>) -> Result<()> {
    serde_json::to_writer(&mut self.out, line).context("Failed to serialize report")?;
    self.out.write_all(b"\n").context("Failed to write report")?;
    Ok(())
  }
}

impl<W: Write> ReportSink for JsonLinesReporter<W> {
  fn publish(&mut self, report: &ArbitrageReport) -> Result<()> {
    let line = Line::Report {
      scan_id: self.scan_id,
      report,
    };
    self.write_line(&line)
  }

  fn publish_failure(&mut self, failure: &MarketFailure) -> Result<()> {
    let line = Line::Failure {
      scan_id: self.scan_id,
      market: &failure.market,
      kind: failure.error.kind(),
      error: failure.error.to_string(),
    };
    self.write_line(&line)
  }

  fn summarize(&mut self, outcome: &ScanOutcome) -> Result<()> {
    let line = Line::Summary {
      scan_id: outcome.scan_id,
      started_at: outcome.started_at.to_rfc3339(),
      markets_seen: outcome.markets_seen,
      markets_skipped: outcome.markets_skipped,
      failed: outcome.failures.len(),
      opportunities: outcome.reports.len(),
      actionable: outcome.actionable().count(),
    };
    self.write_line(&line)?;
    self.out.flush().context("Failed to flush report output")?;
    Ok(())
  }

  fn publish_outcome(&mut self, outcome: &ScanOutcome) -> Result<()> {
    self.scan_id = Some(outcome.scan_id);
    for report in &outcome.reports {
      self.publish(report)?;
    }
    for failure in &outcome.failures {
      self.publish_failure(failure)?;
    }
    self.summarize(outcome)
  }
}

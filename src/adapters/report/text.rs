//! Text Reporter - Human-readable Market Blocks
//!
//! Prints each opportunity as a block of labelled values followed by a
//! blank line, one line per market that could not be evaluated, then a
//! one-line summary of the scan.

use std::io::Write;

use anyhow::{Context, Result};

use crate::domain::allocation::AllocationOutcome;
use crate::domain::market::{ArbitrageReport, MarketFailure, ScanOutcome};
use crate::ports::report_sink::ReportSink;

use super::format_vector;

/// Writes reports as plain text.
pub struct TextReporter<W: Write> {
  out: W,
}

impl<W: Write> TextReporter<W> {
  /// Create a reporter writing to `out`.
  pub fn new(out: W) -> Self {
    Self { out }
  }

  /// Consume the reporter and return the writer.
  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> ReportSink for TextReporter<W> {
  fn publish(&mut self, report: &ArbitrageReport) -> Result<()> {
    let evaluation = &report.evaluation;
    let out = &mut self.out;

    writeln!(out, "Market name:\n {}", report.market)?;
    writeln!(out, "Prices:\n {}", format_vector(&report.prices))?;
    writeln!(
      out,
      "Optimal ratio:\n {}",
      format_vector(&evaluation.optimal_ratio)
    )?;
    writeln!(out, "Profit at optimal ratio:\n {}", evaluation.profit_at_ratio)?;

    match &evaluation.allocation {
      Some(AllocationOutcome::Found(allocation)) => {
        writeln!(
          out,
          "Minimum profitable set of share quantities to purchase:\n {}",
          format_vector(&allocation.quantities)
        )?;
        writeln!(out, "Profit at quantities:\n {}", allocation.worst_case_profit)?;
        writeln!(out, "Total cost:\n ${}", allocation.total_cost)?;
        if !allocation.within_position_cap {
          writeln!(out, "Warning: exceeds the per-contract position cap")?;
        }
      }
      Some(AllocationOutcome::NotFound { .. }) => {
        writeln!(out, "The arbitrage may not be actionable.")?;
      }
      None => {
        writeln!(out, "No arbitrage at the optimal ratio.")?;
      }
    }

    writeln!(out).context("Failed to write report")?;
    Ok(())
  }

  fn publish_failure(&mut self, failure: &MarketFailure) -> Result<()> {
    writeln!(
      self.out,
      "Failed market: {} [{}] {}",
      failure.market,
      failure.error.kind(),
      failure.error
    )
    .context("Failed to write report")
  }

  fn summarize(&mut self, outcome: &ScanOutcome) -> Result<()> {
    writeln!(
      self.out,
      "Scanned {} markets ({} skipped, {} failed): {} opportunities, {} actionable",
      outcome.markets_seen,
      outcome.markets_skipped,
      outcome.failures.len(),
      outcome.reports.len(),
      outcome.actionable().count(),
    )?;
    self.out.flush().context("Failed to flush report output")?;
    Ok(())
  }
}

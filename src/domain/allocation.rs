//! Whole-share allocation search.
//!
//! The optimal ratio is continuous, but PredictIt sells whole shares.
//! Rounding a small multiple of the ratio can wipe out a thin margin, so
//! the search walks scale factors `k = 1, 2, …` and keeps the first
//! rounded allocation whose guaranteed profit is strictly positive.
//!
//! Rounding is half-to-even (banker's rounding): `2.5 → 2`, `3.5 → 4`.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, trace};

use super::error::ArbError;
use super::profit::worst_case_profit;
use super::ratio::optimal_ratio;

/// Largest scale factor tried. Enough to reach practical share-count
/// granularity under PredictIt's per-contract position cap.
pub const MAX_SCALE: u32 = 849;

/// PredictIt's maximum investment in a single contract.
pub const POSITION_CAP_USD: Decimal = dec!(850);

/// A whole-share allocation with positive guaranteed profit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    /// Scale factor applied to the optimal ratio.
    pub scale: u32,
    /// Shares to buy per contract, in contract order.
    pub quantities: Vec<f64>,
    /// Profit in the worst resolution (always > 0).
    pub worst_case_profit: f64,
    /// Total dollars invested, rounded to cents.
    pub total_cost: Decimal,
    /// Whether every contract's cost stays within [`POSITION_CAP_USD`].
    pub within_position_cap: bool,
}

impl Allocation {
    fn new(
        prices: &[f64],
        scale: u32,
        quantities: Vec<f64>,
        worst_case_profit: f64,
    ) -> Result<Self, ArbError> {
        let costs = prices
            .iter()
            .zip(&quantities)
            .map(|(&p, &q)| Ok(to_decimal(p)? * to_decimal(q)?))
            .collect::<Result<Vec<Decimal>, ArbError>>()?;

        let total_cost = costs.iter().copied().sum::<Decimal>().round_dp(2);
        let within_position_cap = costs.iter().all(|c| *c <= POSITION_CAP_USD);

        Ok(Self {
            scale,
            quantities,
            worst_case_profit,
            total_cost,
            within_position_cap,
        })
    }
}

fn to_decimal(value: f64) -> Result<Decimal, ArbError> {
    Decimal::from_f64(value)
        .ok_or_else(|| ArbError::invalid(format!("{value} has no decimal representation")))
}

/// Result of the bounded allocation search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllocationOutcome {
    /// Smallest profitable allocation.
    Found(Allocation),
    /// No scale up to `max_scale` produced a profit.
    NotFound {
        /// Largest scale factor tried.
        max_scale: u32,
    },
}

impl AllocationOutcome {
    /// The allocation, if one was found.
    pub fn allocation(&self) -> Option<&Allocation> {
        match self {
            Self::Found(allocation) => Some(allocation),
            Self::NotFound { .. } => None,
        }
    }
}

/// Everything the arbitrage math says about one market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEvaluation {
    /// Continuous ratio equalizing profit across resolutions.
    pub optimal_ratio: Vec<f64>,
    /// Guaranteed profit when buying exactly `optimal_ratio` shares.
    pub profit_at_ratio: f64,
    /// Whole-share search result. `None` when the continuous ratio is
    /// already unprofitable, since rounding cannot beat it.
    pub allocation: Option<AllocationOutcome>,
}

impl MarketEvaluation {
    /// Whether the market admits arbitrage at the continuous ratio.
    pub fn is_opportunity(&self) -> bool {
        self.profit_at_ratio > 0.0
    }

    /// Whether a whole-share allocation was found.
    pub fn is_actionable(&self) -> bool {
        self.allocation
            .as_ref()
            .and_then(AllocationOutcome::allocation)
            .is_some()
    }
}

/// Finds the smallest profitable whole-share allocation for `prices`.
///
/// # Errors
/// Propagates `InvalidInput`/`SingularSystem` from [`optimal_ratio`].
pub fn smallest_profitable_allocation(prices: &[f64]) -> Result<AllocationOutcome, ArbError> {
    let ratio = optimal_ratio(prices)?;
    search_allocation(prices, &ratio)
}

/// Scans `k = 1..=MAX_SCALE` over a given ratio.
///
/// # Errors
/// `InvalidInput` if `ratio` does not match `prices` in length or has a
/// negative entry (negative share counts cannot be bought).
pub fn search_allocation(prices: &[f64], ratio: &[f64]) -> Result<AllocationOutcome, ArbError> {
    if ratio.len() != prices.len() {
        return Err(ArbError::invalid(format!(
            "{} prices but ratio of length {}",
            prices.len(),
            ratio.len()
        )));
    }
    if let Some((i, r)) = ratio.iter().enumerate().find(|(_, r)| r.is_nan() || **r < 0.0) {
        return Err(ArbError::invalid(format!(
            "ratio entry {i} is {r}; share counts must be non-negative"
        )));
    }

    for scale in 1..=MAX_SCALE {
        let quantities = scale_to_shares(ratio, scale);
        let guaranteed = worst_case_profit(prices, &quantities)?;
        trace!(scale, guaranteed, "Evaluated scale");

        if guaranteed > 0.0 {
            debug!(scale, guaranteed, ?quantities, "Found profitable allocation");
            return Allocation::new(prices, scale, quantities, guaranteed)
                .map(AllocationOutcome::Found);
        }
    }

    debug!(max_scale = MAX_SCALE, "No profitable allocation within search bound");
    Ok(AllocationOutcome::NotFound {
        max_scale: MAX_SCALE,
    })
}

/// Multiplies `ratio` by `scale` and rounds to whole shares (half-to-even).
pub fn scale_to_shares(ratio: &[f64], scale: u32) -> Vec<f64> {
    let k = f64::from(scale);
    ratio.iter().map(|r| (r * k).round_ties_even()).collect()
}

/// Evaluates one market end to end.
///
/// Independent of every other market, so callers may run many of these
/// in parallel.
///
/// # Errors
/// Propagates `InvalidInput`/`SingularSystem`.
pub fn evaluate_market(prices: &[f64]) -> Result<MarketEvaluation, ArbError> {
    let optimal_ratio = optimal_ratio(prices)?;
    let profit_at_ratio = worst_case_profit(prices, &optimal_ratio)?;

    let allocation = if profit_at_ratio > 0.0 {
        Some(search_allocation(prices, &optimal_ratio)?)
    } else {
        None
    };

    Ok(MarketEvaluation {
        optimal_ratio,
        profit_at_ratio,
        allocation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_is_half_to_even() {
        assert_eq!(scale_to_shares(&[0.5, 1.5, 1.25], 1), vec![0.0, 2.0, 1.0]);
        assert_eq!(scale_to_shares(&[1.25], 2), vec![2.0]);
        assert_eq!(scale_to_shares(&[1.75], 2), vec![4.0]);
    }

    #[test]
    fn test_wide_margin_found_at_first_scale() {
        let outcome = smallest_profitable_allocation(&[0.55, 0.62, 0.70]).unwrap();
        let allocation = outcome.allocation().expect("allocation should exist");
        assert_eq!(allocation.scale, 1);
        assert_eq!(allocation.quantities, vec![1.0, 1.0, 1.0]);
        // Worst case is contract 2 winning: 0.955 + 0.962 - 1.87
        assert!((allocation.worst_case_profit - 0.047).abs() < 1e-9);
        assert_eq!(allocation.total_cost, dec!(1.87));
        assert!(allocation.within_position_cap);
    }

    #[test]
    fn test_thin_margin_needs_larger_scale() {
        // Ratio is [1, 0.922]; rounding gives [k, k] until k = 7 → [7, 6].
        let outcome = smallest_profitable_allocation(&[0.1, 0.87]).unwrap();
        let allocation = outcome.allocation().expect("allocation should exist");
        assert_eq!(allocation.scale, 7);
        assert_eq!(allocation.quantities, vec![7.0, 6.0]);
        assert!((allocation.worst_case_profit - 0.002).abs() < 1e-9);
        assert_eq!(allocation.total_cost, dec!(5.92));
    }

    #[test]
    fn test_no_arbitrage_exhausts_search() {
        let outcome = smallest_profitable_allocation(&[0.5, 0.5]).unwrap();
        assert_eq!(outcome, AllocationOutcome::NotFound { max_scale: MAX_SCALE });
        assert!(outcome.allocation().is_none());
    }

    #[test]
    fn test_negative_ratio_rejected() {
        let err = search_allocation(&[0.5, 0.5], &[1.0, -0.5]).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }

    #[test]
    fn test_ratio_length_mismatch_rejected() {
        let err = search_allocation(&[0.5, 0.5, 0.5], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }

    #[test]
    fn test_position_cap_flag() {
        let allocation = Allocation::new(&[0.9, 0.2], 1000, vec![1000.0, 10.0], 1.0).unwrap();
        assert!(!allocation.within_position_cap);
        assert_eq!(allocation.total_cost, dec!(902));
    }

    #[test]
    fn test_unrepresentable_cost_is_an_error() {
        let err = Allocation::new(&[0.5, 0.5], 1, vec![1.0, f64::INFINITY], 1.0).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));

        let err = Allocation::new(&[0.5, 0.5], 1, vec![1.0, 1e30], 1.0).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }

    #[test]
    fn test_evaluate_skips_search_without_edge() {
        let evaluation = evaluate_market(&[0.5, 0.5]).unwrap();
        assert!(!evaluation.is_opportunity());
        assert!(!evaluation.is_actionable());
        assert!(evaluation.allocation.is_none());
        assert!((evaluation.profit_at_ratio + 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_profitable_market() {
        let evaluation = evaluate_market(&[0.1, 0.87]).unwrap();
        assert!(evaluation.is_opportunity());
        assert!(evaluation.is_actionable());
        assert_eq!(evaluation.optimal_ratio.len(), 2);
    }

    #[test]
    fn test_allocation_serializes_with_status_tag() {
        let outcome = AllocationOutcome::NotFound { max_scale: 849 };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "not_found");
        assert_eq!(json["max_scale"], 849);
    }
}

//! Error taxonomy for the arbitrage math.
//!
//! Only two things can go wrong inside the domain layer: the caller hands
//! in malformed input, or the ratio system has no unique solution. A search
//! that finds no profitable allocation is a normal outcome and is modelled
//! by `AllocationOutcome::NotFound`, not by an error.

use thiserror::Error;

/// Failure raised by the profit, ratio and allocation calculations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArbError {
    /// Length mismatch, empty sequence, index out of range, a price outside
    /// (0, 1), a non-finite value, or a negative share ratio.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The ratio system is singular or too ill-conditioned to trust.
    #[error(
        "ratio system for {contracts} contracts has no unique solution \
         (smallest/largest pivot = {pivot_ratio:e})"
    )]
    SingularSystem {
        /// Number of contracts in the market.
        contracts: usize,
        /// Smallest absolute LU pivot divided by the largest.
        pivot_ratio: f64,
    },
}

impl ArbError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Short machine-readable tag for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::SingularSystem { .. } => "singular_system",
        }
    }
}

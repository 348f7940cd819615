//! Domain layer - Core arbitrage math and models.
//!
//! Pure functions over price and quantity vectors: no I/O, no shared
//! state. Everything here can be called from any thread.
//!
//! Leaves first:
//! - `fees`: PredictIt's 10% fee on profit
//! - `profit`: profit per resolution and worst case across resolutions
//! - `ratio`: continuous ratio from the equalizing linear system
//! - `allocation`: whole-share search and per-market evaluation

pub mod allocation;
pub mod error;
pub mod fees;
pub mod market;
pub mod profit;
pub mod ratio;

// Re-export core types for convenience
pub use allocation::{
    Allocation, AllocationOutcome, MAX_SCALE, MarketEvaluation, evaluate_market,
    smallest_profitable_allocation,
};
pub use error::ArbError;
pub use market::{ArbitrageReport, MarketFailure, MarketQuote, ScanOutcome};
pub use profit::{profit, worst_case_profit};
pub use ratio::optimal_ratio;

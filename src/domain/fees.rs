//! PredictIt fee model.
//!
//! PredictIt takes 10% of the profit on every share that pays out.
//! A "no" share bought at price `p` that finishes in the money returns
//! $1.00, so its profit is `1 - p` and the fee is `0.1 × (1 - p)`.
//! Shares that lose pay nothing and are charged nothing.
//!
//! The rate is a property of the exchange, not a tunable, so there is
//! exactly one schedule: [`PREDICTIT_FEE`].

/// The fee schedule charged by PredictIt on winning positions.
pub const PREDICTIT_FEE: ProfitFee = ProfitFee { rate: 0.1 };

/// Proportional fee on the profit of a winning share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitFee {
    /// Fraction of per-share profit kept by the exchange.
    rate: f64,
}

impl ProfitFee {
    /// Fee rate as a fraction of profit.
    pub const fn rate(&self) -> f64 {
        self.rate
    }

    /// Fee owed on `quantity` shares bought at `price` if they pay out.
    ///
    /// Formula: fee = rate × quantity × (1 - price)
    pub fn on_position(&self, price: f64, quantity: f64) -> f64 {
        self.rate * quantity * (1.0 - price)
    }

    /// Net return of one share bought at `price` when it pays out:
    /// the $1 payout minus the stake minus the fee, i.e. `(1 - rate)(1 - p)`.
    pub fn net_payout(&self, price: f64) -> f64 {
        (1.0 - self.rate) * (1.0 - price)
    }
}

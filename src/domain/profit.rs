//! Profit at resolution.
//!
//! A market resolves with exactly one contract's "yes" coming true. Every
//! other contract's "no" shares pay $1 each (less the profit fee); the
//! winning contract's "no" shares pay nothing. The stake on every contract
//! is spent either way.

use super::error::ArbError;
use super::fees::PREDICTIT_FEE;

/// Net profit of holding `quantities` "no" shares bought at `prices` when
/// contract `winning_index` resolves yes.
///
/// profit = winnings − fees on paying contracts − total investment
///
/// # Errors
/// `InvalidInput` if the sequences are empty, differ in length, contain a
/// non-finite value, or `winning_index` is out of range.
pub fn profit(
    prices: &[f64],
    quantities: &[f64],
    winning_index: usize,
) -> Result<f64, ArbError> {
    check_position(prices, quantities)?;
    if winning_index >= prices.len() {
        return Err(ArbError::invalid(format!(
            "winning index {winning_index} out of range for {} contracts",
            prices.len()
        )));
    }
    Ok(resolution_profit(prices, quantities, winning_index))
}

/// Profit for every possible resolution, indexed by winning contract.
///
/// # Errors
/// Same as [`profit`].
pub fn profit_by_outcome(prices: &[f64], quantities: &[f64]) -> Result<Vec<f64>, ArbError> {
    check_position(prices, quantities)?;
    Ok((0..prices.len())
        .map(|i| resolution_profit(prices, quantities, i))
        .collect())
}

/// Guaranteed profit: the minimum of [`profit`] over every winning index.
///
/// # Errors
/// `InvalidInput` for empty or mismatched input.
pub fn worst_case_profit(prices: &[f64], quantities: &[f64]) -> Result<f64, ArbError> {
    check_position(prices, quantities)?;
    Ok((0..prices.len())
        .map(|i| resolution_profit(prices, quantities, i))
        .fold(f64::INFINITY, f64::min))
}

fn resolution_profit(prices: &[f64], quantities: &[f64], winning_index: usize) -> f64 {
    let winning_quantity = quantities[winning_index];
    let winnings = quantities.iter().sum::<f64>() - winning_quantity;

    let total_fees = prices
        .iter()
        .zip(quantities)
        .map(|(&p, &q)| PREDICTIT_FEE.on_position(p, q))
        .sum::<f64>()
        - PREDICTIT_FEE.on_position(prices[winning_index], winning_quantity);

    let investment = prices
        .iter()
        .zip(quantities)
        .map(|(&p, &q)| p * q)
        .sum::<f64>();

    winnings - total_fees - investment
}

fn check_position(prices: &[f64], quantities: &[f64]) -> Result<(), ArbError> {
    if prices.is_empty() {
        return Err(ArbError::invalid("prices is empty"));
    }
    if prices.len() != quantities.len() {
        return Err(ArbError::invalid(format!(
            "{} prices but {} quantities",
            prices.len(),
            quantities.len()
        )));
    }
    if let Some(i) = prices.iter().position(|p| !p.is_finite()) {
        return Err(ArbError::invalid(format!("price {i} is not finite")));
    }
    if let Some(i) = quantities.iter().position(|q| !q.is_finite()) {
        return Err(ArbError::invalid(format!("quantity {i} is not finite")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_even_market_loses_fee() {
        // winnings 1, fees 0.05, investment 1.0
        let p = profit(&[0.5, 0.5], &[1.0, 1.0], 0).unwrap();
        assert!(close(p, -0.05), "Expected -0.05, got {p}");
    }

    #[test]
    fn test_winning_contract_pays_nothing() {
        // Contract 1 wins: only contract 0's 10 shares pay.
        // winnings 10, fee 0.1 × 10 × 0.6 = 0.6, investment 4 + 3 = 7
        let p = profit(&[0.4, 0.6], &[10.0, 5.0], 1).unwrap();
        assert!(close(p, 2.4), "Expected 2.4, got {p}");
    }

    #[test]
    fn test_worst_case_is_minimum() {
        let prices = [0.4, 0.6];
        let quantities = [10.0, 5.0];
        let by_outcome = profit_by_outcome(&prices, &quantities).unwrap();
        let worst = worst_case_profit(&prices, &quantities).unwrap();
        assert_eq!(by_outcome.len(), 2);
        assert!(by_outcome.iter().all(|&p| worst <= p));
        assert!(by_outcome.iter().any(|&p| close(p, worst)));
    }

    #[test]
    fn test_zero_position_is_flat() {
        let worst = worst_case_profit(&[0.3, 0.5, 0.8], &[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(worst, 0.0);
    }

    #[test]
    fn test_empty_prices_rejected() {
        let err = worst_case_profit(&[], &[]).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = profit(&[0.5, 0.5], &[1.0], 0).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }

    #[test]
    fn test_index_out_of_range_rejected() {
        let err = profit(&[0.5, 0.5], &[1.0, 1.0], 2).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_nan_quantity_rejected() {
        let err = worst_case_profit(&[0.5, 0.5], &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }
}

//! Optimal purchase ratio.
//!
//! Buying "no" on every contract of an N-way market hedges every outcome,
//! but only one relative sizing makes the profit identical whichever
//! contract resolves yes. That ratio is found by solving a linear system.
//!
//! Per-share return of contract `j` when contract `w` resolves yes:
//!
//! ```text
//! r(w, j) = (1 - fee)(1 - p_j)   if j != w   (pays out, fee on profit)
//! r(w, j) = -p_j                 if j == w   (stake lost)
//! ```
//!
//! With `x_0 = 1`, each equation `i = 1..N-1` states that the total return
//! when `i` wins equals the total return when `0` wins:
//!
//! ```text
//! Σ_{j≥1} (r(i, j) - r(0, j)) x_j = -(r(i, 0) - r(0, 0))
//! ```

use nalgebra::{DMatrix, DVector};

use super::error::ArbError;
use super::fees::PREDICTIT_FEE;

/// Smallest accepted |pivot| relative to the largest one in the LU factors.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Computes the continuous share ratio that equalizes net profit across all
/// resolutions. `ratio[0]` is always 1.
///
/// The ratio is not checked for sign or profitability; that is left to the
/// worst-case profit evaluation.
///
/// # Errors
/// - `InvalidInput` for fewer than 2 prices or a price outside (0, 1).
/// - `SingularSystem` if the system has no unique solution.
pub fn optimal_ratio(prices: &[f64]) -> Result<Vec<f64>, ArbError> {
    check_prices(prices)?;

    let (matrix, rhs) = equalizing_system(prices);
    let solution = solve(matrix, &rhs)?;

    let mut ratio = Vec::with_capacity(prices.len());
    ratio.push(1.0);
    ratio.extend(solution.iter().copied());
    Ok(ratio)
}

/// Validates a market's price vector for the ratio math.
///
/// # Errors
/// `InvalidInput` for fewer than 2 prices or a price not strictly in (0, 1).
pub fn check_prices(prices: &[f64]) -> Result<(), ArbError> {
    if prices.len() < 2 {
        return Err(ArbError::invalid(format!(
            "need at least 2 contracts, got {}",
            prices.len()
        )));
    }
    if let Some((i, p)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0 && **p < 1.0))
    {
        return Err(ArbError::invalid(format!(
            "price {i} must be strictly between 0 and 1, got {p}"
        )));
    }
    Ok(())
}

fn outcome_return(prices: &[f64], winner: usize, contract: usize) -> f64 {
    if contract == winner {
        -prices[contract]
    } else {
        PREDICTIT_FEE.net_payout(prices[contract])
    }
}

/// Builds the (N-1)×(N-1) system over unknowns `x_1..x_{N-1}`.
fn equalizing_system(prices: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    let unknowns = prices.len() - 1;

    let matrix = DMatrix::from_fn(unknowns, unknowns, |row, col| {
        let (outcome, contract) = (row + 1, col + 1);
        outcome_return(prices, outcome, contract) - outcome_return(prices, 0, contract)
    });

    let rhs = DVector::from_fn(unknowns, |row, _| {
        -(outcome_return(prices, row + 1, 0) - outcome_return(prices, 0, 0))
    });

    (matrix, rhs)
}

fn solve(matrix: DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>, ArbError> {
    let contracts = matrix.nrows() + 1;
    let lu = matrix.lu();

    let pivots = lu.u().diagonal();
    let largest = pivots.amax();
    let smallest = pivots.amin();
    let pivot_ratio = if largest > 0.0 { smallest / largest } else { 0.0 };

    if pivot_ratio.is_nan() || pivot_ratio <= PIVOT_TOLERANCE {
        return Err(ArbError::SingularSystem {
            contracts,
            pivot_ratio,
        });
    }

    match lu.solve(rhs) {
        Some(x) if x.iter().all(|v| v.is_finite()) => Ok(x),
        _ => Err(ArbError::SingularSystem {
            contracts,
            pivot_ratio,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profit::profit_by_outcome;

    #[test]
    fn test_ratio_starts_at_one() {
        let ratio = optimal_ratio(&[0.55, 0.62, 0.70]).unwrap();
        assert_eq!(ratio.len(), 3);
        assert_eq!(ratio[0], 1.0);
    }

    #[test]
    fn test_ratio_closed_form() {
        // Equal profit means x_i × (0.9 + 0.1 p_i) is the same for every i.
        let prices = [0.55, 0.62, 0.70];
        let ratio = optimal_ratio(&prices).unwrap();
        let weight = |p: f64| 0.9 + 0.1 * p;
        for (i, &p) in prices.iter().enumerate() {
            let expected = weight(prices[0]) / weight(p);
            assert!(
                (ratio[i] - expected).abs() < 1e-12,
                "ratio[{i}] = {}, expected {expected}",
                ratio[i]
            );
        }
    }

    #[test]
    fn test_ratio_equalizes_profit() {
        let prices = [0.1, 0.87];
        let ratio = optimal_ratio(&prices).unwrap();
        let profits = profit_by_outcome(&prices, &ratio).unwrap();
        assert!((profits[0] - profits[1]).abs() < 1e-12, "{profits:?}");
        assert!(profits[0] > 0.0);
    }

    #[test]
    fn test_identical_prices_give_unit_ratio() {
        let ratio = optimal_ratio(&[0.5, 0.5]).unwrap();
        assert_eq!(ratio, vec![1.0, 1.0]);
    }

    #[test]
    fn test_deterministic() {
        let prices = [0.31, 0.77, 0.64, 0.92];
        let a = optimal_ratio(&prices).unwrap();
        let b = optimal_ratio(&prices).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_single_contract_rejected() {
        let err = optimal_ratio(&[0.4]).unwrap_err();
        assert!(matches!(err, ArbError::InvalidInput(_)));
    }

    #[test]
    fn test_boundary_prices_rejected() {
        for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let err = optimal_ratio(&[0.5, bad]).unwrap_err();
            assert!(matches!(err, ArbError::InvalidInput(_)), "price {bad}");
        }
    }

    #[test]
    fn test_singular_matrix_detected() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let rhs = DVector::from_vec(vec![1.0, 2.0]);
        let err = solve(matrix, &rhs).unwrap_err();
        assert!(matches!(err, ArbError::SingularSystem { contracts: 3, .. }));
    }

    #[test]
    fn test_near_singular_matrix_detected() {
        let matrix = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0 + 1e-15]);
        let rhs = DVector::from_vec(vec![1.0, 1.0]);
        assert!(solve(matrix, &rhs).is_err());
    }

    #[test]
    fn test_system_is_diagonal() {
        let (matrix, rhs) = equalizing_system(&[0.2, 0.4, 0.6]);
        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix[(0, 1)], 0.0);
        assert_eq!(matrix[(1, 0)], 0.0);
        // -(p_i + 0.9(1 - p_i))
        assert!((matrix[(0, 0)] + 0.94).abs() < 1e-12);
        // -(0.9(1 - p_0) + p_0)
        assert!((rhs[0] + 0.92).abs() < 1e-12);
    }
}

//! Expense total arithmetic.
//!
//! Totals are always recomputed from their factors on the server; any
//! client-supplied `total_amount` is discarded.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from expense factor validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    /// Worker count must be at least one.
    #[error("Number of people must be at least 1")]
    NonPositiveCount,

    /// Quantity must be strictly positive.
    #[error("Quantity must be greater than zero")]
    NonPositiveQuantity,

    /// Unit cost must be strictly positive.
    #[error("Cost must be greater than zero")]
    NonPositiveCost,
}

/// Total for a manpower expense: workers x per-person cost, 2dp.
///
/// # Errors
///
/// Returns an error if `number_of_people < 1` or `per_person_cost <= 0`.
pub fn manpower_total(
    number_of_people: i32,
    per_person_cost: Decimal,
) -> Result<Decimal, ExpenseError> {
    if number_of_people < 1 {
        return Err(ExpenseError::NonPositiveCount);
    }
    if per_person_cost <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveCost);
    }

    Ok((Decimal::from(number_of_people) * per_person_cost).round_dp(2))
}

/// Total for a material expense: quantity x per-unit cost, 2dp.
///
/// # Errors
///
/// Returns an error if `quantity <= 0` or `per_unit_cost <= 0`.
pub fn material_total(quantity: Decimal, per_unit_cost: Decimal) -> Result<Decimal, ExpenseError> {
    if quantity <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveQuantity);
    }
    if per_unit_cost <= Decimal::ZERO {
        return Err(ExpenseError::NonPositiveCost);
    }

    Ok((quantity * per_unit_cost).round_dp(2))
}

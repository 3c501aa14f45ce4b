//! Funds accounting checks.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::FundsError;
use super::types::ProjectFunds;

/// Funds service for business logic.
pub struct FundsService;

impl FundsService {
    /// Validate a new expense against available funds.
    ///
    /// The check runs at write time only: an expense accepted while funds
    /// were available is not re-validated if payments are later deleted.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NonPositiveAmount` if `amount <= 0`.
    /// Returns `FundsError::InsufficientFunds` if `amount` exceeds the
    /// available funds in `funds`.
    pub fn check_expense(funds: &ProjectFunds, amount: Decimal) -> Result<(), FundsError> {
        if amount <= Decimal::ZERO {
            return Err(FundsError::NonPositiveAmount);
        }

        let available = funds.available_funds();
        if amount > available {
            return Err(FundsError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        Ok(())
    }

    /// Validate a payment against the budget ceiling.
    ///
    /// `total_paid` is the cumulative paid amount before this payment;
    /// when re-validating a full-record update the caller subtracts the
    /// old amount first.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NonPositiveAmount` if `amount <= 0`.
    /// Returns `FundsError::FutureDated` if `payment_date > today`.
    /// Returns `FundsError::BudgetExceeded` if the payment would push
    /// cumulative payments past `budget`.
    pub fn check_payment(
        budget: Decimal,
        total_paid: Decimal,
        amount: Decimal,
        payment_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), FundsError> {
        if amount <= Decimal::ZERO {
            return Err(FundsError::NonPositiveAmount);
        }

        if payment_date > today {
            return Err(FundsError::FutureDated(payment_date));
        }

        if total_paid + amount > budget {
            return Err(FundsError::BudgetExceeded {
                budget,
                total_paid,
                amount,
            });
        }

        Ok(())
    }

    /// Validate a project save and return the derived remaining amount.
    ///
    /// `remaining_amount = budget - total_paid`, recomputed on every save.
    ///
    /// # Errors
    ///
    /// Returns `FundsError::NonPositiveBudget` if `budget <= 0`.
    /// Returns `FundsError::NegativePaid` if `total_paid < 0`.
    /// Returns `FundsError::PaidExceedsBudget` if `total_paid > budget`.
    pub fn remaining_amount(budget: Decimal, total_paid: Decimal) -> Result<Decimal, FundsError> {
        if budget <= Decimal::ZERO {
            return Err(FundsError::NonPositiveBudget);
        }

        if total_paid < Decimal::ZERO {
            return Err(FundsError::NegativePaid);
        }

        if total_paid > budget {
            return Err(FundsError::PaidExceedsBudget { total_paid, budget });
        }

        Ok(budget - total_paid)
    }
}

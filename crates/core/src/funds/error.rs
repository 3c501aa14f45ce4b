//! Funds accounting error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Funds-accounting errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundsError {
    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Budget must be strictly positive.
    #[error("Budget must be greater than zero")]
    NonPositiveBudget,

    /// Total paid cannot be negative.
    #[error("Total paid cannot be negative")]
    NegativePaid,

    /// Total paid cannot exceed the project budget.
    #[error("Total paid {total_paid} exceeds budget {budget}")]
    PaidExceedsBudget {
        /// Cumulative paid amount.
        total_paid: Decimal,
        /// Project budget.
        budget: Decimal,
    },

    /// Expense exceeds the funds available at write time.
    #[error("Expense of {requested} exceeds available funds of {available}")]
    InsufficientFunds {
        /// Requested expense amount.
        requested: Decimal,
        /// Available funds at write time.
        available: Decimal,
    },

    /// Payment would push cumulative payments past the budget.
    #[error("Payment of {amount} would exceed the budget: {total_paid} already paid of {budget}")]
    BudgetExceeded {
        /// Project budget.
        budget: Decimal,
        /// Cumulative paid amount before this payment.
        total_paid: Decimal,
        /// Requested payment amount.
        amount: Decimal,
    },

    /// Payment date lies in the future.
    #[error("Payment date {0} is in the future")]
    FutureDated(NaiveDate),
}

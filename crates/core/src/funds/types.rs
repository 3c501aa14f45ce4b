//! Funds accounting data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of a project's money position at a point in time.
///
/// All fields are aggregate sums; the snapshot is read once (inside a
/// transaction) and every check runs against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFunds {
    /// Declared project budget.
    pub budget: Decimal,
    /// Sum of recorded payments.
    pub payments_total: Decimal,
    /// Sum of recorded manpower expenses.
    pub manpower_total: Decimal,
    /// Sum of recorded material expenses.
    pub material_total: Decimal,
}

impl ProjectFunds {
    /// Total recorded expenses across both kinds.
    #[must_use]
    pub fn spent_total(&self) -> Decimal {
        self.manpower_total + self.material_total
    }

    /// Available funds: payments received minus expenses recorded,
    /// floored at zero.
    #[must_use]
    pub fn available_funds(&self) -> Decimal {
        (self.payments_total - self.spent_total()).max(Decimal::ZERO)
    }

    /// Budget utilization: expenses over budget, as a percentage, 2dp.
    #[must_use]
    pub fn utilization_percent(&self) -> Decimal {
        if self.budget.is_zero() {
            Decimal::ZERO
        } else {
            (self.spent_total() / self.budget * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }
}

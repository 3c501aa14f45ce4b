//! Property-based tests for funds accounting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::FundsService;
use super::types::ProjectFunds;

/// Strategy to generate non-negative decimal amounts (0.00 to 10,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate strictly positive amounts (0.01 and up).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Available funds are never negative, whatever the sums look like.
    #[test]
    fn prop_available_funds_never_negative(
        budget in positive_amount(),
        payments in amount(),
        manpower in amount(),
        material in amount(),
    ) {
        let funds = ProjectFunds {
            budget,
            payments_total: payments,
            manpower_total: manpower,
            material_total: material,
        };
        prop_assert!(funds.available_funds() >= Decimal::ZERO);
    }

    /// An accepted expense never exceeds the available funds it was
    /// checked against.
    #[test]
    fn prop_accepted_expense_within_available(
        budget in positive_amount(),
        payments in amount(),
        manpower in amount(),
        material in amount(),
        expense in positive_amount(),
    ) {
        let funds = ProjectFunds {
            budget,
            payments_total: payments,
            manpower_total: manpower,
            material_total: material,
        };
        if FundsService::check_expense(&funds, expense).is_ok() {
            prop_assert!(expense <= funds.available_funds());
        }
    }

    /// Remaining amount plus total paid always reconstructs the budget.
    #[test]
    fn prop_remaining_plus_paid_is_budget(
        budget in positive_amount(),
        paid in amount(),
    ) {
        if let Ok(remaining) = FundsService::remaining_amount(budget, paid) {
            prop_assert_eq!(remaining + paid, budget);
            prop_assert!(remaining >= Decimal::ZERO);
        }
    }

    /// An accepted payment never pushes cumulative payments past the budget.
    #[test]
    fn prop_accepted_payment_bounded_by_budget(
        budget in positive_amount(),
        paid in amount(),
        payment in positive_amount(),
    ) {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        if FundsService::check_payment(budget, paid, payment, today, today).is_ok() {
            prop_assert!(paid + payment <= budget);
        }
    }
}

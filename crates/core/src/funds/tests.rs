//! Funds accounting tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::FundsError;
use super::service::FundsService;
use super::types::ProjectFunds;

fn funds(budget: Decimal, payments: Decimal, manpower: Decimal, material: Decimal) -> ProjectFunds {
    ProjectFunds {
        budget,
        payments_total: payments,
        manpower_total: manpower,
        material_total: material,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_available_funds_basic() {
    let f = funds(dec!(100000), dec!(40000), dec!(10000), dec!(5000));
    assert_eq!(f.available_funds(), dec!(25000));
}

#[test]
fn test_available_funds_floors_at_zero() {
    // Expenses can exceed payments after payment deletion; the floor holds.
    let f = funds(dec!(100000), dec!(10000), dec!(8000), dec!(7000));
    assert_eq!(f.available_funds(), Decimal::ZERO);
}

#[test]
fn test_utilization_percent() {
    let f = funds(dec!(200000), dec!(100000), dec!(30000), dec!(20000));
    assert_eq!(f.utilization_percent(), dec!(25.00));
}

#[test]
fn test_utilization_zero_budget() {
    let f = funds(Decimal::ZERO, dec!(100), dec!(50), Decimal::ZERO);
    assert_eq!(f.utilization_percent(), Decimal::ZERO);
}

#[test]
fn test_check_expense_within_funds() {
    let f = funds(dec!(100000), dec!(40000), dec!(10000), dec!(5000));
    assert!(FundsService::check_expense(&f, dec!(25000)).is_ok());
}

#[test]
fn test_check_expense_exceeds_funds() {
    let f = funds(dec!(100000), dec!(40000), dec!(10000), dec!(5000));
    let err = FundsService::check_expense(&f, dec!(25000.01)).unwrap_err();
    assert_eq!(
        err,
        FundsError::InsufficientFunds {
            requested: dec!(25000.01),
            available: dec!(25000),
        }
    );
}

#[test]
fn test_check_expense_rejects_non_positive() {
    let f = funds(dec!(100000), dec!(40000), Decimal::ZERO, Decimal::ZERO);
    assert_eq!(
        FundsService::check_expense(&f, Decimal::ZERO),
        Err(FundsError::NonPositiveAmount)
    );
    assert_eq!(
        FundsService::check_expense(&f, dec!(-5)),
        Err(FundsError::NonPositiveAmount)
    );
}

#[test]
fn test_check_payment_ok() {
    let today = date(2026, 3, 15);
    assert!(
        FundsService::check_payment(dec!(100000), dec!(60000), dec!(40000), today, today).is_ok()
    );
}

#[test]
fn test_check_payment_exceeds_budget() {
    let today = date(2026, 3, 15);
    let err = FundsService::check_payment(dec!(100000), dec!(60000), dec!(40000.01), today, today)
        .unwrap_err();
    assert_eq!(
        err,
        FundsError::BudgetExceeded {
            budget: dec!(100000),
            total_paid: dec!(60000),
            amount: dec!(40000.01),
        }
    );
}

#[test]
fn test_check_payment_future_dated() {
    let today = date(2026, 3, 15);
    let tomorrow = date(2026, 3, 16);
    assert_eq!(
        FundsService::check_payment(dec!(100000), Decimal::ZERO, dec!(100), tomorrow, today),
        Err(FundsError::FutureDated(tomorrow))
    );
}

#[test]
fn test_check_payment_today_is_allowed() {
    let today = date(2026, 3, 15);
    assert!(FundsService::check_payment(dec!(100000), Decimal::ZERO, dec!(100), today, today).is_ok());
}

#[test]
fn test_check_payment_non_positive() {
    let today = date(2026, 3, 15);
    assert_eq!(
        FundsService::check_payment(dec!(100000), Decimal::ZERO, Decimal::ZERO, today, today),
        Err(FundsError::NonPositiveAmount)
    );
}

#[test]
fn test_remaining_amount() {
    assert_eq!(
        FundsService::remaining_amount(dec!(100000), dec!(25000)),
        Ok(dec!(75000))
    );
}

#[test]
fn test_remaining_amount_full_paid() {
    assert_eq!(
        FundsService::remaining_amount(dec!(100000), dec!(100000)),
        Ok(Decimal::ZERO)
    );
}

#[test]
fn test_remaining_amount_rejects_overpaid() {
    assert_eq!(
        FundsService::remaining_amount(dec!(100000), dec!(100000.01)),
        Err(FundsError::PaidExceedsBudget {
            total_paid: dec!(100000.01),
            budget: dec!(100000),
        })
    );
}

#[test]
fn test_remaining_amount_rejects_bad_inputs() {
    assert_eq!(
        FundsService::remaining_amount(Decimal::ZERO, Decimal::ZERO),
        Err(FundsError::NonPositiveBudget)
    );
    assert_eq!(
        FundsService::remaining_amount(dec!(100), dec!(-1)),
        Err(FundsError::NegativePaid)
    );
}

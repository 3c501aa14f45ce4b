//! Report bucketing tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rstest::rstest;

use super::service::ReportService;
use super::types::{DatedAmount, Granularity};

fn row(y: i32, m: u32, d: u32, amount: Decimal) -> DatedAmount {
    DatedAmount {
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        amount,
    }
}

#[rstest]
#[case(Granularity::Month, 2026, 3, 15, "2026-03")]
#[case(Granularity::Month, 2026, 12, 1, "2026-12")]
#[case(Granularity::Quarter, 2026, 1, 31, "2026-Q1")]
#[case(Granularity::Quarter, 2026, 4, 1, "2026-Q2")]
#[case(Granularity::Quarter, 2026, 9, 30, "2026-Q3")]
#[case(Granularity::Quarter, 2026, 10, 1, "2026-Q4")]
#[case(Granularity::Year, 2026, 6, 15, "2026")]
fn test_period_labels(
    #[case] granularity: Granularity,
    #[case] y: i32,
    #[case] m: u32,
    #[case] d: u32,
    #[case] expected: &str,
) {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    assert_eq!(granularity.period_label(date), expected);
}

#[test]
fn test_granularity_parse() {
    assert_eq!(Granularity::parse("month"), Some(Granularity::Month));
    assert_eq!(Granularity::parse("QUARTER"), Some(Granularity::Quarter));
    assert_eq!(Granularity::parse("Year"), Some(Granularity::Year));
    assert_eq!(Granularity::parse("week"), None);
}

#[test]
fn test_trend_buckets_by_month() {
    let expenses = [
        row(2026, 1, 5, dec!(1000)),
        row(2026, 1, 20, dec!(500)),
        row(2026, 3, 2, dec!(250)),
    ];
    let payments = [row(2026, 1, 1, dec!(5000)), row(2026, 2, 1, dec!(2000))];

    let trend = ReportService::trend(&expenses, &payments, Granularity::Month);

    assert_eq!(trend.len(), 3);
    assert_eq!(trend[0].period, "2026-01");
    assert_eq!(trend[0].expenses, dec!(1500));
    assert_eq!(trend[0].payments, dec!(5000));
    assert_eq!(trend[1].period, "2026-02");
    assert_eq!(trend[1].expenses, Decimal::ZERO);
    assert_eq!(trend[1].payments, dec!(2000));
    assert_eq!(trend[2].period, "2026-03");
    assert_eq!(trend[2].expenses, dec!(250));
    assert_eq!(trend[2].payments, Decimal::ZERO);
}

#[test]
fn test_trend_quarter_collapses_months() {
    let expenses = [
        row(2026, 1, 5, dec!(100)),
        row(2026, 2, 5, dec!(100)),
        row(2026, 3, 5, dec!(100)),
        row(2026, 4, 5, dec!(100)),
    ];

    let trend = ReportService::trend(&expenses, &[], Granularity::Quarter);

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].period, "2026-Q1");
    assert_eq!(trend[0].expenses, dec!(300));
    assert_eq!(trend[1].period, "2026-Q2");
    assert_eq!(trend[1].expenses, dec!(100));
}

#[test]
fn test_trend_ascending_across_years() {
    let payments = [row(2027, 1, 1, dec!(10)), row(2025, 12, 1, dec!(20))];

    let trend = ReportService::trend(&[], &payments, Granularity::Year);

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].period, "2025");
    assert_eq!(trend[1].period, "2027");
}

#[test]
fn test_trend_empty() {
    assert!(ReportService::trend(&[], &[], Granularity::Month).is_empty());
}

#[test]
fn test_breakdown_groups_and_sorts() {
    let rows = vec![
        ("Cement".to_string(), dec!(500)),
        ("Brick".to_string(), dec!(900)),
        ("Cement".to_string(), dec!(700)),
        ("Steel".to_string(), dec!(900)),
    ];

    let breakdown = ReportService::breakdown(rows);

    assert_eq!(breakdown.len(), 3);
    assert_eq!(breakdown[0].label, "Cement");
    assert_eq!(breakdown[0].total, dec!(1200));
    // Equal totals fall back to alphabetical order
    assert_eq!(breakdown[1].label, "Brick");
    assert_eq!(breakdown[2].label, "Steel");
}

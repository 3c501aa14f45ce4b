//! Report computation over dated amount rows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{BreakdownRow, DatedAmount, Granularity, TrendPoint};

/// Report service for trend and breakdown computation.
pub struct ReportService;

impl ReportService {
    /// Bucket expense and payment rows into a trend series.
    ///
    /// Periods with no activity on either side are omitted; the series is
    /// ascending by period label.
    #[must_use]
    pub fn trend(
        expenses: &[DatedAmount],
        payments: &[DatedAmount],
        granularity: Granularity,
    ) -> Vec<TrendPoint> {
        // Period labels sort chronologically, so a BTreeMap gives the
        // ascending series for free.
        let mut buckets: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

        for row in expenses {
            let entry = buckets
                .entry(granularity.period_label(row.date))
                .or_default();
            entry.0 += row.amount;
        }

        for row in payments {
            let entry = buckets
                .entry(granularity.period_label(row.date))
                .or_default();
            entry.1 += row.amount;
        }

        buckets
            .into_iter()
            .map(|(period, (expenses, payments))| TrendPoint {
                period,
                expenses,
                payments,
            })
            .collect()
    }

    /// Group labeled amounts into breakdown rows, largest total first.
    ///
    /// Ties break alphabetically so output order is stable.
    #[must_use]
    pub fn breakdown(rows: impl IntoIterator<Item = (String, Decimal)>) -> Vec<BreakdownRow> {
        let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
        for (label, amount) in rows {
            *totals.entry(label).or_default() += amount;
        }

        let mut result: Vec<BreakdownRow> = totals
            .into_iter()
            .map(|(label, total)| BreakdownRow { label, total })
            .collect();

        result.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
        result
    }
}

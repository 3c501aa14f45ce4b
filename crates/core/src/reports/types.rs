//! Report data types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Time bucket granularity for trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Calendar month buckets (`YYYY-MM`).
    #[default]
    Month,
    /// Calendar quarter buckets (`YYYY-Qn`).
    Quarter,
    /// Calendar year buckets (`YYYY`).
    Year,
}

impl Granularity {
    /// Convert to the query-parameter string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Parse from a query-parameter string value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "month" => Some(Self::Month),
            "quarter" => Some(Self::Quarter),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// The period label a date falls into at this granularity.
    ///
    /// Labels sort chronologically as strings within a granularity.
    #[must_use]
    pub fn period_label(&self, date: NaiveDate) -> String {
        match self {
            Self::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Quarter => {
                let quarter = (date.month() - 1) / 3 + 1;
                format!("{:04}-Q{quarter}", date.year())
            }
            Self::Year => format!("{:04}", date.year()),
        }
    }
}

/// A dated amount row, the raw input for trend bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedAmount {
    /// The date the amount was recorded against.
    pub date: NaiveDate,
    /// The amount.
    pub amount: Decimal,
}

/// One point in a trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Period label (`2026-03`, `2026-Q1`, `2026`).
    pub period: String,
    /// Total expenses recorded in the period.
    pub expenses: Decimal,
    /// Total payments received in the period.
    pub payments: Decimal,
}

/// One row of an expense breakdown (by work type or material item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    /// Work type name, material display name, or custom item name.
    pub label: String,
    /// Total recorded against the label.
    pub total: Decimal,
}

/// Full per-project report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Project ID.
    pub project_id: Uuid,
    /// Human-readable project code.
    pub code: String,
    /// Project name.
    pub name: String,
    /// Project status.
    pub status: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Cumulative payments received.
    pub total_paid: Decimal,
    /// Budget minus total paid.
    pub remaining_amount: Decimal,
    /// Sum of manpower expenses.
    pub manpower_total: Decimal,
    /// Sum of material expenses.
    pub material_total: Decimal,
    /// Sum of all expenses.
    pub total_expenses: Decimal,
    /// Payments minus expenses, floored at zero.
    pub available_funds: Decimal,
    /// Expenses over budget, percent, 2dp.
    pub utilization_percent: Decimal,
    /// Manpower expenses grouped by work type.
    pub manpower_breakdown: Vec<BreakdownRow>,
    /// Material expenses grouped by item.
    pub material_breakdown: Vec<BreakdownRow>,
    /// Requested trend granularity.
    pub granularity: Granularity,
    /// Expense/payment trend series, ascending by period.
    pub trend: Vec<TrendPoint>,
}

/// Per-project row of the portfolio report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummaryRow {
    /// Project ID.
    pub project_id: Uuid,
    /// Human-readable project code.
    pub code: String,
    /// Project name.
    pub name: String,
    /// Project status.
    pub status: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Cumulative payments received.
    pub total_paid: Decimal,
    /// Budget minus total paid.
    pub remaining_amount: Decimal,
    /// Sum of all expenses.
    pub total_expenses: Decimal,
    /// Payments minus expenses, floored at zero.
    pub available_funds: Decimal,
    /// Expenses over budget, percent, 2dp.
    pub utilization_percent: Decimal,
}

/// Totals across all projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of project budgets.
    pub budget: Decimal,
    /// Sum of payments across projects.
    pub total_paid: Decimal,
    /// Sum of expenses across projects.
    pub total_expenses: Decimal,
    /// Sum of per-project available funds.
    pub available_funds: Decimal,
}

/// Portfolio-wide report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Per-project rows.
    pub projects: Vec<ProjectSummaryRow>,
    /// Totals across all projects.
    pub totals: PortfolioTotals,
}

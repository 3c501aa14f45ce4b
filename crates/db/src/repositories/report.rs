//! Report repository: aggregate reads feeding the core report service.
//!
//! All arithmetic (bucketing, breakdowns, utilization) happens in
//! `sitebook-core`; this repository only fetches rows and sums.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use sitebook_core::reports::{
    DatedAmount, Granularity, PortfolioReport, PortfolioTotals, ProjectReport, ProjectSummaryRow,
    ReportService,
};

use crate::entities::{
    labor_work_types, manpower_expenses, material_expenses, material_items, payments, projects,
};
use crate::repositories::expense::project_funds;

/// Label for manpower expenses without a work type.
const UNCATEGORIZED: &str = "uncategorized";

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the portfolio report across all projects.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn portfolio(&self) -> Result<PortfolioReport, ReportError> {
        let all_projects = projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut rows = Vec::with_capacity(all_projects.len());
        let mut totals = PortfolioTotals::default();

        for project in all_projects {
            let funds = project_funds(&self.db, &project).await?;

            totals.budget += project.budget;
            totals.total_paid += project.total_paid;
            totals.total_expenses += funds.spent_total();
            totals.available_funds += funds.available_funds();

            rows.push(ProjectSummaryRow {
                project_id: project.id,
                code: project.code,
                name: project.name,
                status: project.status.as_str().to_string(),
                budget: project.budget,
                total_paid: project.total_paid,
                remaining_amount: project.remaining_amount,
                total_expenses: funds.spent_total(),
                available_funds: funds.available_funds(),
                utilization_percent: funds.utilization_percent(),
            });
        }

        Ok(PortfolioReport {
            projects: rows,
            totals,
        })
    }

    /// Builds the full report for one project.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::ProjectNotFound` for an unknown id.
    pub async fn project_report(
        &self,
        project_id: Uuid,
        granularity: Granularity,
    ) -> Result<ProjectReport, ReportError> {
        let project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ReportError::ProjectNotFound(project_id))?;

        let funds = project_funds(&self.db, &project).await?;

        let manpower = manpower_expenses::Entity::find()
            .filter(manpower_expenses::Column::ProjectId.eq(project_id))
            .find_also_related(labor_work_types::Entity)
            .all(&self.db)
            .await?;

        let material = material_expenses::Entity::find()
            .filter(material_expenses::Column::ProjectId.eq(project_id))
            .find_also_related(material_items::Entity)
            .all(&self.db)
            .await?;

        let payment_rows = payments::Entity::find()
            .filter(payments::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await?;

        let manpower_breakdown = ReportService::breakdown(manpower.iter().map(|(row, wt)| {
            let label = wt
                .as_ref()
                .map_or_else(|| UNCATEGORIZED.to_string(), |wt| wt.name.clone());
            (label, row.total_amount)
        }));

        let material_breakdown = ReportService::breakdown(material.iter().map(|(row, item)| {
            let label = match item {
                Some(item) if item.is_others() => row
                    .custom_item_name
                    .clone()
                    .unwrap_or_else(|| item.display_name.clone()),
                Some(item) => item.display_name.clone(),
                None => UNCATEGORIZED.to_string(),
            };
            (label, row.total_amount)
        }));

        let expense_rows: Vec<DatedAmount> = manpower
            .iter()
            .map(|(row, _)| DatedAmount {
                date: row.date,
                amount: row.total_amount,
            })
            .chain(material.iter().map(|(row, _)| DatedAmount {
                date: row.date,
                amount: row.total_amount,
            }))
            .collect();

        let payment_dated: Vec<DatedAmount> = payment_rows
            .iter()
            .map(|row| DatedAmount {
                date: row.payment_date,
                amount: row.amount,
            })
            .collect();

        let trend = ReportService::trend(&expense_rows, &payment_dated, granularity);

        Ok(ProjectReport {
            project_id: project.id,
            code: project.code,
            name: project.name,
            status: project.status.as_str().to_string(),
            budget: project.budget,
            total_paid: project.total_paid,
            remaining_amount: project.remaining_amount,
            manpower_total: funds.manpower_total,
            material_total: funds.material_total,
            total_expenses: funds.spent_total(),
            available_funds: funds.available_funds(),
            utilization_percent: funds.utilization_percent(),
            manpower_breakdown,
            material_breakdown,
            granularity,
            trend,
        })
    }
}

//! Project repository for project database operations.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use sitebook_core::funds::{FundsError, FundsService};
use sitebook_shared::types::ProjectCode;

use crate::entities::{
    manpower_expenses, material_expenses, payments, projects, sea_orm_active_enums::ProjectStatus,
};

/// Attempts at generating a unique project code before giving up.
const CODE_ATTEMPTS: u32 = 16;

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    /// Could not generate a unique project code.
    #[error("Could not allocate a unique project code")]
    CodeExhausted,

    /// Funds accounting rule violation.
    #[error(transparent)]
    Funds(#[from] FundsError),

    /// Project still has recorded expenses or payments.
    #[error("Project has {expenses} expense(s) and {payments} payment(s) and cannot be deleted")]
    HasRecords {
        /// Number of expense rows (both kinds).
        expenses: u64,
        /// Number of payment rows.
        payments: u64,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name.
    pub name: String,
    /// Land details (plot size, survey number, ...).
    pub land_details: String,
    /// Land address.
    pub land_address: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Planned duration in months.
    pub duration_months: i32,
    /// Initial status.
    pub status: ProjectStatus,
    /// Opening paid amount (normally zero; fixtures may backfill).
    pub total_paid: Decimal,
}

/// Input for updating a project (full-record replacement).
///
/// `total_paid` is intentionally absent: it is owned by the payment
/// lifecycle and never corrected directly.
#[derive(Debug, Clone)]
pub struct UpdateProjectInput {
    /// Project name.
    pub name: String,
    /// Land details.
    pub land_details: String,
    /// Land address.
    pub land_address: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Planned duration in months.
    pub duration_months: i32,
    /// Status.
    pub status: ProjectStatus,
}

/// Project repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new project with an auto-assigned code.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Budget is not strictly positive
    /// - Opening paid amount is negative or exceeds the budget
    /// - A unique code cannot be allocated
    /// - Database operation fails
    pub async fn create(&self, input: CreateProjectInput) -> Result<projects::Model, ProjectError> {
        let remaining = FundsService::remaining_amount(input.budget, input.total_paid)?;
        let code = self.allocate_code().await?;

        let now = Utc::now().into();
        let project = projects::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code.into_inner()),
            name: Set(input.name),
            land_details: Set(input.land_details),
            land_address: Set(input.land_address),
            budget: Set(input.budget),
            duration_months: Set(input.duration_months),
            status: Set(input.status),
            total_paid: Set(input.total_paid),
            remaining_amount: Set(remaining),
            document_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = project.insert(&self.db).await?;
        Ok(created)
    }

    /// Picks a random unused project code.
    async fn allocate_code(&self) -> Result<ProjectCode, ProjectError> {
        for _ in 0..CODE_ATTEMPTS {
            let suffix: u16 = rand::rng().random_range(0..10_000);
            let code = ProjectCode::from_suffix(suffix);

            let taken = projects::Entity::find()
                .filter(projects::Column::Code.eq(code.as_str()))
                .one(&self.db)
                .await?
                .is_some();

            if !taken {
                return Ok(code);
            }
        }

        Err(ProjectError::CodeExhausted)
    }

    /// Gets a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not found or the query fails.
    pub async fn get(&self, project_id: Uuid) -> Result<projects::Model, ProjectError> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ProjectError::NotFound(project_id))
    }

    /// Lists all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<projects::Model>, ProjectError> {
        let list = projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(list)
    }

    /// Updates a project (full-record replacement).
    ///
    /// `remaining_amount` is recomputed from the new budget and the stored
    /// `total_paid`; a budget below what has already been paid is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not found, the new budget is
    /// invalid, or the database operation fails.
    pub async fn update(
        &self,
        project_id: Uuid,
        input: UpdateProjectInput,
    ) -> Result<projects::Model, ProjectError> {
        let project = self.get(project_id).await?;

        let remaining = FundsService::remaining_amount(input.budget, project.total_paid)?;

        let mut active: projects::ActiveModel = project.into();
        active.name = Set(input.name);
        active.land_details = Set(input.land_details);
        active.land_address = Set(input.land_address);
        active.budget = Set(input.budget);
        active.duration_months = Set(input.duration_months);
        active.status = Set(input.status);
        active.remaining_amount = Set(remaining);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a project.
    ///
    /// Rejected while any expenses or payments reference the project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::HasRecords` if child rows exist.
    pub async fn delete(&self, project_id: Uuid) -> Result<(), ProjectError> {
        let project = self.get(project_id).await?;

        let manpower_count = manpower_expenses::Entity::find()
            .filter(manpower_expenses::Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await?;
        let material_count = material_expenses::Entity::find()
            .filter(material_expenses::Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await?;
        let payment_count = payments::Entity::find()
            .filter(payments::Column::ProjectId.eq(project_id))
            .count(&self.db)
            .await?;

        if manpower_count + material_count + payment_count > 0 {
            return Err(ProjectError::HasRecords {
                expenses: manpower_count + material_count,
                payments: payment_count,
            });
        }

        projects::Entity::delete_by_id(project.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Records the storage key of the project document.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not found or the update fails.
    pub async fn set_document_path(
        &self,
        project_id: Uuid,
        document_path: Option<String>,
    ) -> Result<projects::Model, ProjectError> {
        let project = self.get(project_id).await?;

        let mut active: projects::ActiveModel = project.into();
        active.document_path = Set(document_path);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}

/// Applies a paid-amount delta to a project row inside a transaction.
///
/// Shared by the payment repository; recomputes `remaining_amount` so the
/// invariant `remaining = budget - total_paid` holds after every save.
pub(crate) async fn apply_paid_delta<C: ConnectionTrait>(
    conn: &C,
    project: projects::Model,
    delta: Decimal,
) -> Result<projects::Model, DbErr> {
    let new_total = project.total_paid + delta;
    let remaining = project.budget - new_total;

    let mut active: projects::ActiveModel = project.into();
    active.total_paid = Set(new_total);
    active.remaining_amount = Set(remaining);
    active.updated_at = Set(Utc::now().into());

    active.update(conn).await
}

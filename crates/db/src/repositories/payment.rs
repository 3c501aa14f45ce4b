//! Payment repository maintaining the project's denormalized paid total.
//!
//! Creating a payment increments `projects.total_paid`; deleting one
//! decrements it; replacing one applies the delta. Each lifecycle event
//! runs in a single transaction with the ceiling check so the running
//! total and `remaining_amount` stay consistent with the payment rows.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use sitebook_core::funds::{FundsError, FundsService};

use crate::entities::{payments, projects, sea_orm_active_enums::PaymentType};
use crate::repositories::project::apply_paid_delta;

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Funds accounting rule violation.
    #[error(transparent)]
    Funds(#[from] FundsError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or replacing a payment.
#[derive(Debug, Clone)]
pub struct PaymentInput {
    /// Parent project.
    pub project_id: Uuid,
    /// Payment amount.
    pub amount: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// Payment method.
    pub payment_type: PaymentType,
    /// Free-text description.
    pub description: String,
}

/// Payment repository for payment lifecycle operations.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment and increments the project's paid total.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Project does not exist
    /// - Amount is not strictly positive
    /// - Payment date lies in the future
    /// - Cumulative payments would exceed the budget
    /// - Database operation fails
    pub async fn create(&self, input: PaymentInput) -> Result<payments::Model, PaymentError> {
        let txn = self.db.begin().await?;

        let project = find_project(&txn, input.project_id).await?;

        FundsService::check_payment(
            project.budget,
            project.total_paid,
            input.amount,
            input.payment_date,
            Utc::now().date_naive(),
        )?;

        let now = Utc::now().into();
        let row = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project.id),
            amount: Set(input.amount),
            payment_date: Set(input.payment_date),
            payment_type: Set(input.payment_type),
            description: Set(input.description),
            receipt_path: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = row.insert(&txn).await?;
        apply_paid_delta(&txn, project, input.amount).await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Gets a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<payments::Model, PaymentError> {
        payments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentError::NotFound(id))
    }

    /// Lists payments, newest date first, optionally per project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, project_id: Option<Uuid>) -> Result<Vec<payments::Model>, PaymentError> {
        let mut query = payments::Entity::find().order_by_desc(payments::Column::PaymentDate);

        if let Some(project_id) = project_id {
            query = query.filter(payments::Column::ProjectId.eq(project_id));
        }

        let list = query.all(&self.db).await?;
        Ok(list)
    }

    /// Replaces a payment (full-record update) and applies the paid delta.
    ///
    /// The ceiling check runs against the paid total with the old amount
    /// backed out first.
    ///
    /// # Errors
    ///
    /// Same failure modes as `create`, plus not-found.
    pub async fn update(
        &self,
        id: Uuid,
        input: PaymentInput,
    ) -> Result<payments::Model, PaymentError> {
        let txn = self.db.begin().await?;

        let existing = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        // Payments stay with their project.
        let project = find_project(&txn, existing.project_id).await?;

        FundsService::check_payment(
            project.budget,
            project.total_paid - existing.amount,
            input.amount,
            input.payment_date,
            Utc::now().date_naive(),
        )?;

        let delta = input.amount - existing.amount;

        let mut active: payments::ActiveModel = existing.into();
        active.amount = Set(input.amount);
        active.payment_date = Set(input.payment_date);
        active.payment_type = Set(input.payment_type);
        active.description = Set(input.description);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        apply_paid_delta(&txn, project, delta).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a payment and decrements the project's paid total.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), PaymentError> {
        let txn = self.db.begin().await?;

        let existing = payments::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        let project = find_project(&txn, existing.project_id).await?;
        let amount = existing.amount;

        payments::Entity::delete_by_id(existing.id).exec(&txn).await?;
        apply_paid_delta(&txn, project, -amount).await?;

        txn.commit().await?;
        Ok(())
    }

    /// Records the storage key of the payment receipt.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found or the update fails.
    pub async fn set_receipt_path(
        &self,
        id: Uuid,
        receipt_path: Option<String>,
    ) -> Result<payments::Model, PaymentError> {
        let payment = self.get(id).await?;

        let mut active: payments::ActiveModel = payment.into();
        active.receipt_path = Set(receipt_path);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}

async fn find_project<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
) -> Result<projects::Model, PaymentError> {
    projects::Entity::find_by_id(project_id)
        .one(conn)
        .await?
        .ok_or(PaymentError::ProjectNotFound(project_id))
}

//! Expense repository for manpower and material expense operations.
//!
//! Both kinds share the same lifecycle: totals are recomputed from their
//! factors, and every write runs the available-funds check against sums
//! read inside the same transaction as the row write.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use sitebook_core::expense::{self, ExpenseError as CalcError};
use sitebook_core::funds::{FundsError, FundsService, ProjectFunds};

use crate::entities::{
    labor_work_types, manpower_expenses, material_expenses, material_items, payments, projects,
};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
    NotFound(Uuid),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// Labor work type not found.
    #[error("Labor work type not found: {0}")]
    WorkTypeNotFound(Uuid),

    /// Material item not found.
    #[error("Material item not found: {0}")]
    ItemNotFound(Uuid),

    /// The "others" item requires a custom item name.
    #[error("Custom item name is required for the 'others' material item")]
    CustomNameRequired,

    /// Factor validation failure (count, quantity, cost).
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Funds accounting rule violation.
    #[error(transparent)]
    Funds(#[from] FundsError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or replacing a manpower expense.
#[derive(Debug, Clone)]
pub struct ManpowerExpenseInput {
    /// Parent project.
    pub project_id: Uuid,
    /// Labor work type, if categorized.
    pub work_type_id: Option<Uuid>,
    /// Date the labor was engaged.
    pub date: NaiveDate,
    /// Number of workers.
    pub number_of_people: i32,
    /// Per-person daily cost.
    pub per_person_cost: Decimal,
    /// Free-text description.
    pub description: String,
}

/// Input for creating or replacing a material expense.
#[derive(Debug, Clone)]
pub struct MaterialExpenseInput {
    /// Parent project.
    pub project_id: Uuid,
    /// Material item from the catalog.
    pub item_id: Uuid,
    /// Free-text name, required when the item is "others".
    pub custom_item_name: Option<String>,
    /// Purchase date.
    pub date: NaiveDate,
    /// Quantity purchased.
    pub quantity: Decimal,
    /// Per-unit cost.
    pub per_unit_cost: Decimal,
    /// Free-text description.
    pub description: String,
}

/// Expense repository covering both expense kinds.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Manpower expenses
    // ========================================================================

    /// Creates a manpower expense.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Project or work type does not exist
    /// - Factors are not strictly positive
    /// - The total exceeds available funds at write time
    /// - Database operation fails
    pub async fn create_manpower(
        &self,
        input: ManpowerExpenseInput,
    ) -> Result<manpower_expenses::Model, ExpenseError> {
        let txn = self.db.begin().await?;

        let project = find_project(&txn, input.project_id).await?;
        check_work_type(&txn, input.work_type_id).await?;

        let total = expense::manpower_total(input.number_of_people, input.per_person_cost)?;

        let funds = project_funds(&txn, &project).await?;
        FundsService::check_expense(&funds, total)?;

        let now = Utc::now().into();
        let row = manpower_expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project.id),
            work_type_id: Set(input.work_type_id),
            date: Set(input.date),
            number_of_people: Set(input.number_of_people),
            per_person_cost: Set(input.per_person_cost),
            total_amount: Set(total),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = row.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Gets a manpower expense by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the expense is not found or the query fails.
    pub async fn get_manpower(&self, id: Uuid) -> Result<manpower_expenses::Model, ExpenseError> {
        manpower_expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    /// Lists manpower expenses, newest date first, optionally per project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_manpower(
        &self,
        project_id: Option<Uuid>,
    ) -> Result<Vec<(manpower_expenses::Model, Option<labor_work_types::Model>)>, ExpenseError>
    {
        let mut query = manpower_expenses::Entity::find()
            .find_also_related(labor_work_types::Entity)
            .order_by_desc(manpower_expenses::Column::Date);

        if let Some(project_id) = project_id {
            query = query.filter(manpower_expenses::Column::ProjectId.eq(project_id));
        }

        let list = query.all(&self.db).await?;
        Ok(list)
    }

    /// Replaces a manpower expense (full-record update).
    ///
    /// The funds check excludes the expense's previous amount from the
    /// spent sum.
    ///
    /// # Errors
    ///
    /// Same failure modes as `create_manpower`, plus not-found.
    pub async fn update_manpower(
        &self,
        id: Uuid,
        input: ManpowerExpenseInput,
    ) -> Result<manpower_expenses::Model, ExpenseError> {
        let txn = self.db.begin().await?;

        let existing = manpower_expenses::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ExpenseError::NotFound(id))?;

        // Expenses stay with their project; the project_id is part of the
        // full record but may not point elsewhere.
        let project = find_project(&txn, existing.project_id).await?;
        check_work_type(&txn, input.work_type_id).await?;

        let total = expense::manpower_total(input.number_of_people, input.per_person_cost)?;

        let mut funds = project_funds(&txn, &project).await?;
        funds.manpower_total -= existing.total_amount;
        FundsService::check_expense(&funds, total)?;

        let mut active: manpower_expenses::ActiveModel = existing.into();
        active.work_type_id = Set(input.work_type_id);
        active.date = Set(input.date);
        active.number_of_people = Set(input.number_of_people);
        active.per_person_cost = Set(input.per_person_cost);
        active.total_amount = Set(total);
        active.description = Set(input.description);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a manpower expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the expense is not found or the delete fails.
    pub async fn delete_manpower(&self, id: Uuid) -> Result<(), ExpenseError> {
        let existing = self.get_manpower(id).await?;
        manpower_expenses::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // ========================================================================
    // Material expenses
    // ========================================================================

    /// Creates a material expense.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Project or material item does not exist
    /// - Item is "others" and no custom item name was supplied
    /// - Factors are not strictly positive
    /// - The total exceeds available funds at write time
    /// - Database operation fails
    pub async fn create_material(
        &self,
        input: MaterialExpenseInput,
    ) -> Result<material_expenses::Model, ExpenseError> {
        let txn = self.db.begin().await?;

        let project = find_project(&txn, input.project_id).await?;
        let item = find_item(&txn, input.item_id).await?;
        let custom_item_name = resolve_custom_name(&item, input.custom_item_name)?;

        let total = expense::material_total(input.quantity, input.per_unit_cost)?;

        let funds = project_funds(&txn, &project).await?;
        FundsService::check_expense(&funds, total)?;

        let now = Utc::now().into();
        let row = material_expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project.id),
            item_id: Set(item.id),
            custom_item_name: Set(custom_item_name),
            date: Set(input.date),
            quantity: Set(input.quantity),
            per_unit_cost: Set(input.per_unit_cost),
            total_amount: Set(total),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = row.insert(&txn).await?;
        txn.commit().await?;
        Ok(created)
    }

    /// Gets a material expense by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the expense is not found or the query fails.
    pub async fn get_material(&self, id: Uuid) -> Result<material_expenses::Model, ExpenseError> {
        material_expenses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ExpenseError::NotFound(id))
    }

    /// Lists material expenses, newest date first, optionally per project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_material(
        &self,
        project_id: Option<Uuid>,
    ) -> Result<Vec<(material_expenses::Model, Option<material_items::Model>)>, ExpenseError> {
        let mut query = material_expenses::Entity::find()
            .find_also_related(material_items::Entity)
            .order_by_desc(material_expenses::Column::Date);

        if let Some(project_id) = project_id {
            query = query.filter(material_expenses::Column::ProjectId.eq(project_id));
        }

        let list = query.all(&self.db).await?;
        Ok(list)
    }

    /// Replaces a material expense (full-record update).
    ///
    /// # Errors
    ///
    /// Same failure modes as `create_material`, plus not-found.
    pub async fn update_material(
        &self,
        id: Uuid,
        input: MaterialExpenseInput,
    ) -> Result<material_expenses::Model, ExpenseError> {
        let txn = self.db.begin().await?;

        let existing = material_expenses::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ExpenseError::NotFound(id))?;

        let project = find_project(&txn, existing.project_id).await?;
        let item = find_item(&txn, input.item_id).await?;
        let custom_item_name = resolve_custom_name(&item, input.custom_item_name)?;

        let total = expense::material_total(input.quantity, input.per_unit_cost)?;

        let mut funds = project_funds(&txn, &project).await?;
        funds.material_total -= existing.total_amount;
        FundsService::check_expense(&funds, total)?;

        let mut active: material_expenses::ActiveModel = existing.into();
        active.item_id = Set(item.id);
        active.custom_item_name = Set(custom_item_name);
        active.date = Set(input.date);
        active.quantity = Set(input.quantity);
        active.per_unit_cost = Set(input.per_unit_cost);
        active.total_amount = Set(total);
        active.description = Set(input.description);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a material expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the expense is not found or the delete fails.
    pub async fn delete_material(&self, id: Uuid) -> Result<(), ExpenseError> {
        let existing = self.get_material(id).await?;
        material_expenses::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

async fn find_project<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
) -> Result<projects::Model, ExpenseError> {
    projects::Entity::find_by_id(project_id)
        .one(conn)
        .await?
        .ok_or(ExpenseError::ProjectNotFound(project_id))
}

async fn check_work_type<C: ConnectionTrait>(
    conn: &C,
    work_type_id: Option<Uuid>,
) -> Result<(), ExpenseError> {
    if let Some(id) = work_type_id {
        labor_work_types::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ExpenseError::WorkTypeNotFound(id))?;
    }
    Ok(())
}

async fn find_item<C: ConnectionTrait>(
    conn: &C,
    item_id: Uuid,
) -> Result<material_items::Model, ExpenseError> {
    material_items::Entity::find_by_id(item_id)
        .one(conn)
        .await?
        .ok_or(ExpenseError::ItemNotFound(item_id))
}

/// Enforces the "others" escape hatch: a custom name is required for the
/// others item and dropped for catalog items.
fn resolve_custom_name(
    item: &material_items::Model,
    custom_item_name: Option<String>,
) -> Result<Option<String>, ExpenseError> {
    if item.is_others() {
        match custom_item_name {
            Some(name) if !name.trim().is_empty() => Ok(Some(name)),
            _ => Err(ExpenseError::CustomNameRequired),
        }
    } else {
        Ok(None)
    }
}

/// Reads a project's funds snapshot: budget plus payment/expense sums.
///
/// Callers run it on the transaction that performs the subsequent write.
pub(crate) async fn project_funds<C: ConnectionTrait>(
    conn: &C,
    project: &projects::Model,
) -> Result<ProjectFunds, DbErr> {
    let payments_total = sum_payments(conn, project.id).await?;
    let manpower_total = sum_column(
        conn,
        manpower_expenses::Entity::find()
            .filter(manpower_expenses::Column::ProjectId.eq(project.id))
            .select_only()
            .column_as(manpower_expenses::Column::TotalAmount.sum(), "total"),
    )
    .await?;
    let material_total = sum_column(
        conn,
        material_expenses::Entity::find()
            .filter(material_expenses::Column::ProjectId.eq(project.id))
            .select_only()
            .column_as(material_expenses::Column::TotalAmount.sum(), "total"),
    )
    .await?;

    Ok(ProjectFunds {
        budget: project.budget,
        payments_total,
        manpower_total,
        material_total,
    })
}

/// Sum of recorded payments for a project.
async fn sum_payments<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
) -> Result<Decimal, DbErr> {
    sum_column(
        conn,
        payments::Entity::find()
            .filter(payments::Column::ProjectId.eq(project_id))
            .select_only()
            .column_as(payments::Column::Amount.sum(), "total"),
    )
    .await
}

async fn sum_column<C: ConnectionTrait, E: EntityTrait>(
    conn: &C,
    query: sea_orm::Select<E>,
) -> Result<Decimal, DbErr> {
    let total: Option<Option<Decimal>> = query.into_tuple().one(conn).await?;
    Ok(total.flatten().unwrap_or(Decimal::ZERO))
}

//! Catalog repository for labor work types and material items.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{labor_work_types, manpower_expenses, material_expenses, material_items};

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog entry not found.
    #[error("Catalog entry not found: {0}")]
    NotFound(Uuid),

    /// Name already exists in the catalog.
    #[error("Catalog entry '{0}' already exists")]
    DuplicateName(String),

    /// Entry is referenced by recorded expenses and cannot be deleted.
    #[error("Catalog entry is referenced by {0} expense(s) and cannot be deleted")]
    InUse(u64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a labor work type.
#[derive(Debug, Clone)]
pub struct CreateWorkTypeInput {
    /// Unique work type name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Input for creating a material item.
#[derive(Debug, Clone)]
pub struct CreateMaterialItemInput {
    /// Unique machine name.
    pub name: String,
    /// Display name.
    pub display_name: String,
}

/// Catalog repository for lookup-table operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Labor work types
    // ========================================================================

    /// Lists labor work types, alphabetical.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_work_types(&self) -> Result<Vec<labor_work_types::Model>, CatalogError> {
        let list = labor_work_types::Entity::find()
            .order_by_asc(labor_work_types::Column::Name)
            .all(&self.db)
            .await?;
        Ok(list)
    }

    /// Creates a labor work type.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateName` if the name is taken.
    pub async fn create_work_type(
        &self,
        input: CreateWorkTypeInput,
    ) -> Result<labor_work_types::Model, CatalogError> {
        let existing = labor_work_types::Entity::find()
            .filter(labor_work_types::Column::Name.eq(&input.name))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let now = Utc::now().into();
        let row = labor_work_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = row.insert(&self.db).await?;
        Ok(created)
    }

    /// Deletes a labor work type unless expenses reference it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InUse` while manpower expenses reference it.
    pub async fn delete_work_type(&self, id: Uuid) -> Result<(), CatalogError> {
        let work_type = labor_work_types::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let references = manpower_expenses::Entity::find()
            .filter(manpower_expenses::Column::WorkTypeId.eq(id))
            .count(&self.db)
            .await?;

        if references > 0 {
            return Err(CatalogError::InUse(references));
        }

        labor_work_types::Entity::delete_by_id(work_type.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    // ========================================================================
    // Material items
    // ========================================================================

    /// Lists material items, alphabetical by display name.
    ///
    /// Inactive items are hidden unless `include_inactive` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_material_items(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<material_items::Model>, CatalogError> {
        let mut query = material_items::Entity::find()
            .order_by_asc(material_items::Column::DisplayName);

        if !include_inactive {
            query = query.filter(material_items::Column::IsActive.eq(true));
        }

        let list = query.all(&self.db).await?;
        Ok(list)
    }

    /// Creates a material item.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateName` if the name is taken.
    pub async fn create_material_item(
        &self,
        input: CreateMaterialItemInput,
    ) -> Result<material_items::Model, CatalogError> {
        let existing = material_items::Entity::find()
            .filter(material_items::Column::Name.eq(&input.name))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(CatalogError::DuplicateName(input.name));
        }

        let now = Utc::now().into();
        let row = material_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            display_name: Set(input.display_name),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = row.insert(&self.db).await?;
        Ok(created)
    }

    /// Deletes a material item unless expenses reference it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InUse` while material expenses reference it.
    pub async fn delete_material_item(&self, id: Uuid) -> Result<(), CatalogError> {
        let item = material_items::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let references = material_expenses::Entity::find()
            .filter(material_expenses::Column::ItemId.eq(id))
            .count(&self.db)
            .await?;

        if references > 0 {
            return Err(CatalogError::InUse(references));
        }

        material_items::Entity::delete_by_id(item.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

//! `SeaORM` Entity for the material_items catalog table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Machine name of the free-text escape-hatch item.
pub const OTHERS_ITEM_NAME: &str = "others";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Whether this is the "others" escape-hatch item, which requires a
    /// custom item name on every expense referencing it.
    #[must_use]
    pub fn is_others(&self) -> bool {
        self.name == OTHERS_ITEM_NAME
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::material_expenses::Entity")]
    MaterialExpenses,
}

impl Related<super::material_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

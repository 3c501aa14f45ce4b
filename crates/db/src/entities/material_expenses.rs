//! `SeaORM` Entity for the material_expenses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "material_expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub item_id: Uuid,
    pub custom_item_name: Option<String>,
    pub date: Date,
    pub quantity: Decimal,
    pub per_unit_cost: Decimal,
    pub total_amount: Decimal,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
    #[sea_orm(
        belongs_to = "super::material_items::Entity",
        from = "Column::ItemId",
        to = "super::material_items::Column::Id"
    )]
    MaterialItems,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::material_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

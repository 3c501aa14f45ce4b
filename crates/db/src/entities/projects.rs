//! `SeaORM` Entity for the projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ProjectStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub land_details: String,
    pub land_address: String,
    pub budget: Decimal,
    pub duration_months: i32,
    pub status: ProjectStatus,
    pub total_paid: Decimal,
    pub remaining_amount: Decimal,
    pub document_path: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::manpower_expenses::Entity")]
    ManpowerExpenses,
    #[sea_orm(has_many = "super::material_expenses::Entity")]
    MaterialExpenses,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::manpower_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManpowerExpenses.def()
    }
}

impl Related<super::material_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialExpenses.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

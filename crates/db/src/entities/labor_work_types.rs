//! `SeaORM` Entity for the labor_work_types catalog table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "labor_work_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::manpower_expenses::Entity")]
    ManpowerExpenses,
}

impl Related<super::manpower_expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManpowerExpenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! `SeaORM` Entity for the manpower_expenses table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "manpower_expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub work_type_id: Option<Uuid>,
    pub date: Date,
    pub number_of_people: i32,
    pub per_person_cost: Decimal,
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
        belongs_to = "super::labor_work_types::Entity",
        from = "Column::WorkTypeId",
        to = "super::labor_work_types::Column::Id"
    )]
    LaborWorkTypes,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::labor_work_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LaborWorkTypes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

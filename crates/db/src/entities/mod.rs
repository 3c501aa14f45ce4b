//! `SeaORM` entity definitions.

pub mod labor_work_types;
pub mod manpower_expenses;
pub mod material_expenses;
pub mod material_items;
pub mod payments;
pub mod projects;
pub mod sea_orm_active_enums;

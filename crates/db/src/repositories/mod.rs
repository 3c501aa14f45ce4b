//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod catalog;
pub mod expense;
pub mod payment;
pub mod project;
pub mod report;

pub use catalog::{
    CatalogError, CatalogRepository, CreateMaterialItemInput, CreateWorkTypeInput,
};
pub use expense::{
    ExpenseError, ExpenseRepository, ManpowerExpenseInput, MaterialExpenseInput,
};
pub use payment::{PaymentError, PaymentInput, PaymentRepository};
pub use project::{CreateProjectInput, ProjectError, ProjectRepository, UpdateProjectInput};
pub use report::{ReportError, ReportRepository};

//! Expense routes.
//!
//! Manpower and material expenses share one `/expenses` surface,
//! discriminated by a `kind` tag: in the body on create, as a query
//! parameter on id-addressed operations.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use sitebook_db::entities::{labor_work_types, manpower_expenses, material_expenses, material_items};
use sitebook_db::repositories::{
    ExpenseError, ExpenseRepository, ManpowerExpenseInput, MaterialExpenseInput,
};

use crate::AppState;
use crate::routes::{field_error_response, internal_error_response, validation_error_response};
use crate::routes::projects::map_funds_error;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
        .route("/expenses/{expense_id}", get(get_expense))
        .route("/expenses/{expense_id}", put(update_expense))
        .route("/expenses/{expense_id}", delete(delete_expense))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Which expense table a request addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpenseKind {
    Manpower,
    Material,
}

impl ExpenseKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "manpower" => Some(Self::Manpower),
            "material" => Some(Self::Material),
            _ => None,
        }
    }
}

/// Query parameters for expense routes.
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    /// Expense kind: manpower or material.
    pub kind: Option<String>,
    /// Restrict to one project.
    pub project_id: Option<Uuid>,
}

/// Request body for a manpower expense.
#[derive(Debug, Deserialize, Validate)]
pub struct ManpowerExpenseRequest {
    /// Parent project.
    pub project_id: Uuid,
    /// Labor work type, if categorized.
    pub work_type_id: Option<Uuid>,
    /// Date the labor was engaged.
    pub date: NaiveDate,
    /// Number of workers.
    #[validate(range(min = 1, message = "number_of_people must be at least 1"))]
    pub number_of_people: i32,
    /// Per-person daily cost.
    pub per_person_cost: Decimal,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Request body for a material expense.
#[derive(Debug, Deserialize, Validate)]
pub struct MaterialExpenseRequest {
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
    #[serde(default)]
    pub description: String,
}

/// Create body: the `kind` tag picks the variant.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreateExpenseRequest {
    /// Manpower expense.
    Manpower(ManpowerExpenseRequest),
    /// Material expense.
    Material(MaterialExpenseRequest),
}

/// Response for a manpower expense.
#[derive(Debug, Serialize)]
pub struct ManpowerExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Discriminator, always "manpower".
    pub kind: &'static str,
    /// Parent project.
    pub project_id: Uuid,
    /// Labor work type ID.
    pub work_type_id: Option<Uuid>,
    /// Labor work type name, when resolved.
    pub work_type: Option<String>,
    /// Date the labor was engaged.
    pub date: NaiveDate,
    /// Number of workers.
    pub number_of_people: i32,
    /// Per-person daily cost.
    pub per_person_cost: Decimal,
    /// Server-computed total.
    pub total_amount: Decimal,
    /// Description.
    pub description: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl ManpowerExpenseResponse {
    fn new(row: manpower_expenses::Model, work_type: Option<labor_work_types::Model>) -> Self {
        Self {
            id: row.id,
            kind: "manpower",
            project_id: row.project_id,
            work_type_id: row.work_type_id,
            work_type: work_type.map(|wt| wt.name),
            date: row.date,
            number_of_people: row.number_of_people,
            per_person_cost: row.per_person_cost,
            total_amount: row.total_amount,
            description: row.description,
            created_at: row.created_at.to_rfc3339(),
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}

/// Response for a material expense.
#[derive(Debug, Serialize)]
pub struct MaterialExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// Discriminator, always "material".
    pub kind: &'static str,
    /// Parent project.
    pub project_id: Uuid,
    /// Material item ID.
    pub item_id: Uuid,
    /// Material item display name, when resolved.
    pub item: Option<String>,
    /// Custom name for "others" expenses.
    pub custom_item_name: Option<String>,
    /// Purchase date.
    pub date: NaiveDate,
    /// Quantity purchased.
    pub quantity: Decimal,
    /// Per-unit cost.
    pub per_unit_cost: Decimal,
    /// Server-computed total.
    pub total_amount: Decimal,
    /// Description.
    pub description: String,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl MaterialExpenseResponse {
    fn new(row: material_expenses::Model, item: Option<material_items::Model>) -> Self {
        Self {
            id: row.id,
            kind: "material",
            project_id: row.project_id,
            item_id: row.item_id,
            item: item.map(|i| i.display_name),
            custom_item_name: row.custom_item_name,
            date: row.date,
            quantity: row.quantity,
            per_unit_cost: row.per_unit_cost,
            total_amount: row.total_amount,
            description: row.description,
            created_at: row.created_at.to_rfc3339(),
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/expenses?kind=..&project_id=..` - List expenses of one kind.
async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseQuery>,
) -> impl IntoResponse {
    let kind = match require_kind(query.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = ExpenseRepository::new((*state.db).clone());

    match kind {
        ExpenseKind::Manpower => match repo.list_manpower(query.project_id).await {
            Ok(list) => {
                let response: Vec<ManpowerExpenseResponse> = list
                    .into_iter()
                    .map(|(row, wt)| ManpowerExpenseResponse::new(row, wt))
                    .collect();
                (StatusCode::OK, Json(json!({ "expenses": response }))).into_response()
            }
            Err(e) => {
                error!(error = %e, "Failed to list manpower expenses");
                internal_error_response()
            }
        },
        ExpenseKind::Material => match repo.list_material(query.project_id).await {
            Ok(list) => {
                let response: Vec<MaterialExpenseResponse> = list
                    .into_iter()
                    .map(|(row, item)| MaterialExpenseResponse::new(row, item))
                    .collect();
                (StatusCode::OK, Json(json!({ "expenses": response }))).into_response()
            }
            Err(e) => {
                error!(error = %e, "Failed to list material expenses");
                internal_error_response()
            }
        },
    }
}

/// POST `/expenses` - Create an expense; the body's `kind` tag picks the table.
async fn create_expense(
    State(state): State<AppState>,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    let repo = ExpenseRepository::new((*state.db).clone());

    match payload {
        CreateExpenseRequest::Manpower(request) => {
            if let Err(errors) = request.validate() {
                return validation_error_response(&errors);
            }

            match repo.create_manpower(manpower_input(request)).await {
                Ok(row) => {
                    info!(expense_id = %row.id, project_id = %row.project_id, "Manpower expense created");
                    (
                        StatusCode::CREATED,
                        Json(ManpowerExpenseResponse::new(row, None)),
                    )
                        .into_response()
                }
                Err(e) => {
                    error!(error = %e, "Failed to create manpower expense");
                    map_expense_error(&e)
                }
            }
        }
        CreateExpenseRequest::Material(request) => {
            if let Err(errors) = request.validate() {
                return validation_error_response(&errors);
            }

            match repo.create_material(material_input(request)).await {
                Ok(row) => {
                    info!(expense_id = %row.id, project_id = %row.project_id, "Material expense created");
                    (
                        StatusCode::CREATED,
                        Json(MaterialExpenseResponse::new(row, None)),
                    )
                        .into_response()
                }
                Err(e) => {
                    error!(error = %e, "Failed to create material expense");
                    map_expense_error(&e)
                }
            }
        }
    }
}

/// GET `/expenses/{expense_id}?kind=..` - Get one expense.
async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
    Query(query): Query<ExpenseQuery>,
) -> impl IntoResponse {
    let kind = match require_kind(query.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = ExpenseRepository::new((*state.db).clone());

    match kind {
        ExpenseKind::Manpower => match repo.get_manpower(expense_id).await {
            Ok(row) => {
                (StatusCode::OK, Json(ManpowerExpenseResponse::new(row, None))).into_response()
            }
            Err(e) => map_expense_error(&e),
        },
        ExpenseKind::Material => match repo.get_material(expense_id).await {
            Ok(row) => {
                (StatusCode::OK, Json(MaterialExpenseResponse::new(row, None))).into_response()
            }
            Err(e) => map_expense_error(&e),
        },
    }
}

/// PUT `/expenses/{expense_id}?kind=..` - Replace an expense.
async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
    Query(query): Query<ExpenseQuery>,
    Json(payload): Json<serde_json::Value>,
) -> impl IntoResponse {
    let kind = match require_kind(query.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = ExpenseRepository::new((*state.db).clone());

    match kind {
        ExpenseKind::Manpower => {
            let request: ManpowerExpenseRequest = match serde_json::from_value(payload) {
                Ok(request) => request,
                Err(e) => return field_error_response("body", &format!("Invalid body: {e}")),
            };
            if let Err(errors) = request.validate() {
                return validation_error_response(&errors);
            }

            match repo.update_manpower(expense_id, manpower_input(request)).await {
                Ok(row) => {
                    info!(expense_id = %expense_id, "Manpower expense updated");
                    (StatusCode::OK, Json(ManpowerExpenseResponse::new(row, None))).into_response()
                }
                Err(e) => {
                    error!(error = %e, "Failed to update manpower expense");
                    map_expense_error(&e)
                }
            }
        }
        ExpenseKind::Material => {
            let request: MaterialExpenseRequest = match serde_json::from_value(payload) {
                Ok(request) => request,
                Err(e) => return field_error_response("body", &format!("Invalid body: {e}")),
            };
            if let Err(errors) = request.validate() {
                return validation_error_response(&errors);
            }

            match repo.update_material(expense_id, material_input(request)).await {
                Ok(row) => {
                    info!(expense_id = %expense_id, "Material expense updated");
                    (StatusCode::OK, Json(MaterialExpenseResponse::new(row, None))).into_response()
                }
                Err(e) => {
                    error!(error = %e, "Failed to update material expense");
                    map_expense_error(&e)
                }
            }
        }
    }
}

/// DELETE `/expenses/{expense_id}?kind=..` - Delete an expense.
async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
    Query(query): Query<ExpenseQuery>,
) -> impl IntoResponse {
    let kind = match require_kind(query.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let repo = ExpenseRepository::new((*state.db).clone());

    let result = match kind {
        ExpenseKind::Manpower => repo.delete_manpower(expense_id).await,
        ExpenseKind::Material => repo.delete_material(expense_id).await,
    };

    match result {
        Ok(()) => {
            info!(expense_id = %expense_id, "Expense deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete expense");
            map_expense_error(&e)
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn require_kind(kind: Option<&str>) -> Result<ExpenseKind, axum::response::Response> {
    kind.and_then(ExpenseKind::parse).ok_or_else(|| {
        field_error_response("kind", "kind must be one of: manpower, material")
    })
}

fn manpower_input(request: ManpowerExpenseRequest) -> ManpowerExpenseInput {
    ManpowerExpenseInput {
        project_id: request.project_id,
        work_type_id: request.work_type_id,
        date: request.date,
        number_of_people: request.number_of_people,
        per_person_cost: request.per_person_cost,
        description: request.description,
    }
}

fn material_input(request: MaterialExpenseRequest) -> MaterialExpenseInput {
    MaterialExpenseInput {
        project_id: request.project_id,
        item_id: request.item_id,
        custom_item_name: request.custom_item_name,
        date: request.date,
        quantity: request.quantity,
        per_unit_cost: request.per_unit_cost,
        description: request.description,
    }
}

/// Maps expense errors to HTTP responses.
fn map_expense_error(e: &ExpenseError) -> axum::response::Response {
    match e {
        ExpenseError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Expense not found: {}", id)
            })),
        )
            .into_response(),
        ExpenseError::ProjectNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Project not found: {}", id)
            })),
        )
            .into_response(),
        ExpenseError::WorkTypeNotFound(id) => field_error_response(
            "work_type_id",
            &format!("Labor work type not found: {id}"),
        ),
        ExpenseError::ItemNotFound(id) => {
            field_error_response("item_id", &format!("Material item not found: {id}"))
        }
        ExpenseError::CustomNameRequired => field_error_response(
            "custom_item_name",
            "Custom item name is required for the 'others' material item",
        ),
        ExpenseError::Calc(calc) => field_error_response("amount", &calc.to_string()),
        ExpenseError::Funds(funds) => map_funds_error(funds),
        ExpenseError::Database(_) => {
            error!(error = %e, "Expense operation failed");
            internal_error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_kind_tag() {
        let body = serde_json::json!({
            "kind": "manpower",
            "project_id": Uuid::nil(),
            "date": "2026-03-15",
            "number_of_people": 5,
            "per_person_cost": "850"
        });

        let parsed: CreateExpenseRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(parsed, CreateExpenseRequest::Manpower(_)));
    }

    #[test]
    fn test_create_request_material_tag() {
        let body = serde_json::json!({
            "kind": "material",
            "project_id": Uuid::nil(),
            "item_id": Uuid::nil(),
            "date": "2026-03-15",
            "quantity": "100",
            "per_unit_cost": "7.50"
        });

        let parsed: CreateExpenseRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(parsed, CreateExpenseRequest::Material(_)));
    }

    #[test]
    fn test_create_request_unknown_kind() {
        let body = serde_json::json!({
            "kind": "equipment",
            "project_id": Uuid::nil(),
            "date": "2026-03-15"
        });

        assert!(serde_json::from_value::<CreateExpenseRequest>(body).is_err());
    }

    #[test]
    fn test_require_kind() {
        assert!(require_kind(Some("manpower")).is_ok());
        assert!(require_kind(Some("material")).is_ok());
        assert!(require_kind(Some("equipment")).is_err());
        assert!(require_kind(None).is_err());
    }

    #[test]
    fn test_manpower_request_validation() {
        let request = ManpowerExpenseRequest {
            project_id: Uuid::nil(),
            work_type_id: None,
            date: chrono::NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            number_of_people: 0,
            per_person_cost: Decimal::ONE,
            description: String::new(),
        };
        assert!(request.validate().is_err());
    }
}

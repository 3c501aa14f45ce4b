//! Catalog routes: labor work types and material items.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use sitebook_db::entities::{labor_work_types, material_items};
use sitebook_db::repositories::{
    CatalogError, CatalogRepository, CreateMaterialItemInput, CreateWorkTypeInput,
};

use crate::AppState;
use crate::routes::{internal_error_response, validation_error_response};

/// Creates the catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/labor-work-types", get(list_work_types))
        .route("/labor-work-types", post(create_work_type))
        .route("/labor-work-types/{work_type_id}", delete(delete_work_type))
        .route("/material-items", get(list_material_items))
        .route("/material-items", post(create_material_item))
        .route("/material-items/{item_id}", delete(delete_material_item))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a labor work type.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkTypeRequest {
    /// Unique work type name.
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Request body for creating a material item.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaterialItemRequest {
    /// Unique machine name.
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "display_name must be 1-100 characters"))]
    pub display_name: String,
}

/// Query parameters for listing material items.
#[derive(Debug, Deserialize)]
pub struct MaterialItemQuery {
    /// Include inactive items.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Response for a labor work type.
#[derive(Debug, Serialize)]
pub struct WorkTypeResponse {
    /// Work type ID.
    pub id: Uuid,
    /// Work type name.
    pub name: String,
    /// Description.
    pub description: String,
}

impl From<labor_work_types::Model> for WorkTypeResponse {
    fn from(wt: labor_work_types::Model) -> Self {
        Self {
            id: wt.id,
            name: wt.name,
            description: wt.description,
        }
    }
}

/// Response for a material item.
#[derive(Debug, Serialize)]
pub struct MaterialItemResponse {
    /// Material item ID.
    pub id: Uuid,
    /// Machine name.
    pub name: String,
    /// Display name.
    pub display_name: String,
    /// Whether the item is offered for new expenses.
    pub is_active: bool,
}

impl From<material_items::Model> for MaterialItemResponse {
    fn from(item: material_items::Model) -> Self {
        Self {
            id: item.id,
            name: item.name,
            display_name: item.display_name,
            is_active: item.is_active,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/labor-work-types` - List work types.
async fn list_work_types(State(state): State<AppState>) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.list_work_types().await {
        Ok(list) => {
            let response: Vec<WorkTypeResponse> =
                list.into_iter().map(WorkTypeResponse::from).collect();
            (StatusCode::OK, Json(json!({ "work_types": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list work types");
            internal_error_response()
        }
    }
}

/// POST `/labor-work-types` - Create a work type.
async fn create_work_type(
    State(state): State<AppState>,
    Json(payload): Json<CreateWorkTypeRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    let repo = CatalogRepository::new((*state.db).clone());
    let input = CreateWorkTypeInput {
        name: payload.name,
        description: payload.description,
    };

    match repo.create_work_type(input).await {
        Ok(wt) => {
            info!(work_type_id = %wt.id, name = %wt.name, "Work type created");
            (StatusCode::CREATED, Json(WorkTypeResponse::from(wt))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create work type");
            map_catalog_error(&e)
        }
    }
}

/// DELETE `/labor-work-types/{work_type_id}` - Delete an unreferenced work type.
async fn delete_work_type(
    State(state): State<AppState>,
    Path(work_type_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.delete_work_type(work_type_id).await {
        Ok(()) => {
            info!(work_type_id = %work_type_id, "Work type deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete work type");
            map_catalog_error(&e)
        }
    }
}

/// GET `/material-items?include_inactive=..` - List material items.
async fn list_material_items(
    State(state): State<AppState>,
    Query(query): Query<MaterialItemQuery>,
) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.list_material_items(query.include_inactive).await {
        Ok(list) => {
            let response: Vec<MaterialItemResponse> =
                list.into_iter().map(MaterialItemResponse::from).collect();
            (StatusCode::OK, Json(json!({ "material_items": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list material items");
            internal_error_response()
        }
    }
}

/// POST `/material-items` - Create a material item.
async fn create_material_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateMaterialItemRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    let repo = CatalogRepository::new((*state.db).clone());
    let input = CreateMaterialItemInput {
        name: payload.name,
        display_name: payload.display_name,
    };

    match repo.create_material_item(input).await {
        Ok(item) => {
            info!(item_id = %item.id, name = %item.name, "Material item created");
            (StatusCode::CREATED, Json(MaterialItemResponse::from(item))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create material item");
            map_catalog_error(&e)
        }
    }
}

/// DELETE `/material-items/{item_id}` - Delete an unreferenced material item.
async fn delete_material_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = CatalogRepository::new((*state.db).clone());

    match repo.delete_material_item(item_id).await {
        Ok(()) => {
            info!(item_id = %item_id, "Material item deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete material item");
            map_catalog_error(&e)
        }
    }
}

// ============================================================================
// Error Mapping
// ============================================================================

/// Maps catalog errors to HTTP responses.
fn map_catalog_error(e: &CatalogError) -> axum::response::Response {
    match e {
        CatalogError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Catalog entry not found: {}", id)
            })),
        )
            .into_response(),
        CatalogError::DuplicateName(name) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_name",
                "message": format!("Catalog entry '{}' already exists", name)
            })),
        )
            .into_response(),
        CatalogError::InUse(count) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "catalog_entry_in_use",
                "message": format!(
                    "Catalog entry is referenced by {} expense(s) and cannot be deleted",
                    count
                )
            })),
        )
            .into_response(),
        CatalogError::Database(_) => {
            error!(error = %e, "Catalog operation failed");
            internal_error_response()
        }
    }
}

//! Project management routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;
use validator::Validate;

use sitebook_core::funds::FundsError;
use sitebook_core::storage::{StorageError, StorageService};
use sitebook_db::entities::{projects, sea_orm_active_enums::ProjectStatus};
use sitebook_db::repositories::{
    CreateProjectInput, ProjectError, ProjectRepository, UpdateProjectInput,
};

use sitebook_shared::AppError;

use crate::AppState;
use crate::routes::{
    app_error_response, field_error_response, internal_error_response, validation_error_response,
};

/// Creates the project routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects))
        .route("/projects", post(create_project))
        .route("/projects/{project_id}", get(get_project))
        .route("/projects/{project_id}", axum::routing::put(update_project))
        .route(
            "/projects/{project_id}",
            axum::routing::delete(delete_project),
        )
        .route("/projects/{project_id}/document", post(upload_document))
        .route("/projects/{project_id}/document", get(download_document))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// Land details.
    #[serde(default)]
    pub land_details: String,
    /// Land address.
    #[serde(default)]
    pub land_address: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Planned duration in months.
    #[serde(default)]
    #[validate(range(min = 0, message = "duration_months cannot be negative"))]
    pub duration_months: i32,
    /// Status: active, completed, on_hold, cancelled. Defaults to active.
    pub status: Option<String>,
    /// Opening paid amount. Defaults to zero.
    pub total_paid: Option<Decimal>,
}

/// Request body for replacing a project.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    /// Land details.
    #[serde(default)]
    pub land_details: String,
    /// Land address.
    #[serde(default)]
    pub land_address: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Planned duration in months.
    #[serde(default)]
    #[validate(range(min = 0, message = "duration_months cannot be negative"))]
    pub duration_months: i32,
    /// Status: active, completed, on_hold, cancelled.
    pub status: String,
}

/// Response for a project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: Uuid,
    /// Human-readable project code.
    pub code: String,
    /// Project name.
    pub name: String,
    /// Land details.
    pub land_details: String,
    /// Land address.
    pub land_address: String,
    /// Declared budget.
    pub budget: Decimal,
    /// Planned duration in months.
    pub duration_months: i32,
    /// Status label.
    pub status: String,
    /// Cumulative payments received.
    pub total_paid: Decimal,
    /// Budget minus total paid.
    pub remaining_amount: Decimal,
    /// Storage key of the uploaded document, if any.
    pub document_path: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<projects::Model> for ProjectResponse {
    fn from(p: projects::Model) -> Self {
        Self {
            id: p.id,
            code: p.code,
            name: p.name,
            land_details: p.land_details,
            land_address: p.land_address,
            budget: p.budget,
            duration_months: p.duration_months,
            status: p.status.as_str().to_string(),
            total_paid: p.total_paid,
            remaining_amount: p.remaining_amount,
            document_path: p.document_path,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/projects` - List projects, newest first.
async fn list_projects(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.list().await {
        Ok(list) => {
            let response: Vec<ProjectResponse> =
                list.into_iter().map(ProjectResponse::from).collect();
            (StatusCode::OK, Json(json!({ "projects": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list projects");
            internal_error_response()
        }
    }
}

/// POST `/projects` - Create a project with an auto-assigned code.
async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    let status = match parse_status(payload.status.as_deref(), ProjectStatus::Active) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let repo = ProjectRepository::new((*state.db).clone());
    let input = CreateProjectInput {
        name: payload.name,
        land_details: payload.land_details,
        land_address: payload.land_address,
        budget: payload.budget,
        duration_months: payload.duration_months,
        status,
        total_paid: payload.total_paid.unwrap_or(Decimal::ZERO),
    };

    match repo.create(input).await {
        Ok(project) => {
            info!(project_id = %project.id, code = %project.code, "Project created");
            (
                StatusCode::CREATED,
                Json(ProjectResponse::from(project)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create project");
            map_project_error(&e)
        }
    }
}

/// GET `/projects/{project_id}` - Get a project.
async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.get(project_id).await {
        Ok(project) => (StatusCode::OK, Json(ProjectResponse::from(project))).into_response(),
        Err(e) => map_project_error(&e),
    }
}

/// PUT `/projects/{project_id}` - Replace a project.
async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return validation_error_response(&errors);
    }

    let status = match parse_status(Some(&payload.status), ProjectStatus::Active) {
        Ok(status) => status,
        Err(response) => return response,
    };

    let repo = ProjectRepository::new((*state.db).clone());
    let input = UpdateProjectInput {
        name: payload.name,
        land_details: payload.land_details,
        land_address: payload.land_address,
        budget: payload.budget,
        duration_months: payload.duration_months,
        status,
    };

    match repo.update(project_id, input).await {
        Ok(project) => {
            info!(project_id = %project_id, "Project updated");
            (StatusCode::OK, Json(ProjectResponse::from(project))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update project");
            map_project_error(&e)
        }
    }
}

/// DELETE `/projects/{project_id}` - Delete a project with no records.
async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    match repo.delete(project_id).await {
        Ok(()) => {
            info!(project_id = %project_id, "Project deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete project");
            map_project_error(&e)
        }
    }
}

/// POST `/projects/{project_id}/document` - Upload the project document (PDF).
async fn upload_document(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    multipart: Multipart,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    // 404 before reading the body
    let project = match repo.get(project_id).await {
        Ok(project) => project,
        Err(e) => return map_project_error(&e),
    };

    let file = match read_upload(multipart).await {
        Ok(file) => file,
        Err(response) => return response,
    };

    let key = StorageService::document_key(project.id, &file.filename);
    if let Err(e) = state
        .storage
        .store(&key, &file.content_type, file.data)
        .await
    {
        return map_storage_error(&e);
    }

    match repo.set_document_path(project_id, Some(key)).await {
        Ok(project) => {
            info!(project_id = %project_id, "Project document uploaded");
            (StatusCode::OK, Json(ProjectResponse::from(project))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to record document path");
            map_project_error(&e)
        }
    }
}

/// GET `/projects/{project_id}/document` - Download the project document.
async fn download_document(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ProjectRepository::new((*state.db).clone());

    let project = match repo.get(project_id).await {
        Ok(project) => project,
        Err(e) => return map_project_error(&e),
    };

    let Some(key) = project.document_path else {
        return app_error_response(&AppError::NotFound("Project has no document".to_string()));
    };

    match state.storage.load(&key).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/pdf")],
            data,
        )
            .into_response(),
        Err(e) => map_storage_error(&e),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A file pulled out of a multipart body.
pub(crate) struct UploadedFile {
    /// Original filename.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// Reads the `file` field from a multipart body.
pub(crate) async fn read_upload(
    mut multipart: Multipart,
) -> Result<UploadedFile, axum::response::Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(field_error_response("file", &format!("Invalid upload: {e}")));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("document.pdf").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                return Err(field_error_response("file", &format!("Invalid upload: {e}")));
            }
        };

        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }

    Err(field_error_response("file", "Missing 'file' field"))
}

/// Maps storage errors to HTTP responses.
pub(crate) fn map_storage_error(e: &StorageError) -> axum::response::Response {
    match e {
        StorageError::FileTooLarge { size, max } => field_error_response(
            "file",
            &format!("File of {size} bytes exceeds the {max} byte limit"),
        ),
        StorageError::InvalidMimeType { mime_type } => field_error_response(
            "file",
            &format!("Only application/pdf uploads are accepted, got {mime_type}"),
        ),
        StorageError::NotFound { .. } => {
            app_error_response(&AppError::NotFound("File not found in storage".to_string()))
        }
        StorageError::Configuration(_) | StorageError::Operation(_) => {
            error!(error = %e, "Storage operation failed");
            internal_error_response()
        }
    }
}

/// Parses a status string, falling back to a default when absent.
fn parse_status(
    status: Option<&str>,
    default: ProjectStatus,
) -> Result<ProjectStatus, axum::response::Response> {
    match status {
        None => Ok(default),
        Some(s) => ProjectStatus::parse(s).ok_or_else(|| {
            field_error_response(
                "status",
                "Invalid status. Must be one of: active, completed, on_hold, cancelled",
            )
        }),
    }
}

/// Maps project errors to HTTP responses.
fn map_project_error(e: &ProjectError) -> axum::response::Response {
    match e {
        ProjectError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Project not found: {}", id)
            })),
        )
            .into_response(),
        ProjectError::HasRecords { expenses, payments } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "project_has_records",
                "message": format!(
                    "Project has {} expense(s) and {} payment(s) and cannot be deleted",
                    expenses, payments
                )
            })),
        )
            .into_response(),
        ProjectError::Funds(funds) => map_funds_error(funds),
        ProjectError::CodeExhausted | ProjectError::Database(_) => {
            error!(error = %e, "Project operation failed");
            internal_error_response()
        }
    }
}

/// Maps funds errors to HTTP responses, shared across route modules.
///
/// Input-shape problems are 400s; budget-ceiling violations are 422s.
pub(crate) fn map_funds_error(e: &FundsError) -> axum::response::Response {
    match e {
        FundsError::NonPositiveAmount => field_error_response("amount", &e.to_string()),
        FundsError::NonPositiveBudget | FundsError::NegativePaid => {
            field_error_response("budget", &e.to_string())
        }
        FundsError::FutureDated(_) => field_error_response("payment_date", &e.to_string()),
        FundsError::InsufficientFunds { .. }
        | FundsError::BudgetExceeded { .. }
        | FundsError::PaidExceedsBudget { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "budget_exceeded",
                "message": e.to_string()
            })),
        )
            .into_response(),
    }
}

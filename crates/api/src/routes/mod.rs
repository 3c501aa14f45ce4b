//! API route definitions.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use validator::ValidationErrors;

use sitebook_shared::AppError;

use crate::AppState;

pub mod catalogs;
pub mod expenses;
pub mod health;
pub mod pages;
pub mod payments;
pub mod projects;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(projects::routes())
        .merge(expenses::routes())
        .merge(payments::routes())
        .merge(catalogs::routes())
        .merge(reports::routes())
}

/// Maps `validator` failures to a 400 with field-level messages.
pub(crate) fn validation_error_response(errors: &ValidationErrors) -> axum::response::Response {
    let fields: serde_json::Map<String, serde_json::Value> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string)
                })
                .collect();
            ((*field).to_string(), json!(messages))
        })
        .collect();

    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "validation_error",
            "message": "Request validation failed",
            "fields": fields
        })),
    )
        .into_response()
}

/// Standard 400 for a single bad field.
pub(crate) fn field_error_response(field: &str, message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "validation_error",
            "message": message,
            "fields": { field: [message] }
        })),
    )
        .into_response()
}

/// Renders an `AppError` with its canonical status and code.
pub(crate) fn app_error_response(e: &AppError) -> axum::response::Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": e.error_code().to_lowercase(),
            "message": e.to_string()
        })),
    )
        .into_response()
}

/// Standard 500 body. Details stay in the logs.
pub(crate) fn internal_error_response() -> axum::response::Response {
    app_error_response(&AppError::Internal("An error occurred".to_string()))
}

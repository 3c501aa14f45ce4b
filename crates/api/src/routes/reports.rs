//! Reporting routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use sitebook_core::reports::Granularity;
use sitebook_db::repositories::{ReportError, ReportRepository};

use crate::AppState;
use crate::routes::{field_error_response, internal_error_response};

/// Creates the reporting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(portfolio_report))
        .route("/reports/{project_id}", get(project_report))
}

/// Query parameters for the project report.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Trend bucket granularity: month, quarter, or year. Defaults to month.
    pub granularity: Option<String>,
}

/// GET `/reports` - Portfolio-wide budget/payment/expense summary.
async fn portfolio_report(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.portfolio().await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build portfolio report");
            internal_error_response()
        }
    }
}

/// GET `/reports/{project_id}?granularity=..` - Per-project report with trend.
async fn project_report(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    let granularity = match query.granularity.as_deref() {
        None => Granularity::default(),
        Some(s) => match Granularity::parse(s) {
            Some(g) => g,
            None => {
                return field_error_response(
                    "granularity",
                    "Invalid granularity. Must be one of: month, quarter, year",
                );
            }
        },
    };

    let repo = ReportRepository::new((*state.db).clone());

    match repo.project_report(project_id, granularity).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => match e {
            ReportError::ProjectNotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": format!("Project not found: {}", id)
                })),
            )
                .into_response(),
            ReportError::Database(_) => {
                error!(error = %e, "Failed to build project report");
                internal_error_response()
            }
        },
    }
}

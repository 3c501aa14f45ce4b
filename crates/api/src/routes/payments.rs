//! Payment routes.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use sitebook_core::storage::StorageService;
use sitebook_db::entities::{payments, sea_orm_active_enums::PaymentType};
use sitebook_db::repositories::{PaymentError, PaymentInput, PaymentRepository};

use sitebook_shared::AppError;

use crate::AppState;
use crate::routes::projects::{map_funds_error, map_storage_error, read_upload};
use crate::routes::{app_error_response, field_error_response, internal_error_response};

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", get(list_payments))
        .route("/payments", post(create_payment))
        .route("/payments/{payment_id}", get(get_payment))
        .route("/payments/{payment_id}", put(update_payment))
        .route("/payments/{payment_id}", delete(delete_payment))
        .route("/payments/{payment_id}/receipt", post(upload_receipt))
        .route("/payments/{payment_id}/receipt", get(download_receipt))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing payments.
#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    /// Restrict to one project.
    pub project_id: Option<Uuid>,
}

/// Request body for creating or replacing a payment.
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    /// Parent project.
    pub project_id: Uuid,
    /// Payment amount.
    pub amount: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// Payment method: cash, bank_transfer, cheque, upi, other.
    pub payment_type: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

/// Response for a payment.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Parent project.
    pub project_id: Uuid,
    /// Payment amount.
    pub amount: Decimal,
    /// Date the payment was received.
    pub payment_date: NaiveDate,
    /// Payment method.
    pub payment_type: String,
    /// Description.
    pub description: String,
    /// Storage key of the uploaded receipt, if any.
    pub receipt_path: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<payments::Model> for PaymentResponse {
    fn from(p: payments::Model) -> Self {
        Self {
            id: p.id,
            project_id: p.project_id,
            amount: p.amount,
            payment_date: p.payment_date,
            payment_type: p.payment_type.as_str().to_string(),
            description: p.description,
            receipt_path: p.receipt_path,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/payments?project_id=..` - List payments, newest first.
async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    match repo.list(query.project_id).await {
        Ok(list) => {
            let response: Vec<PaymentResponse> =
                list.into_iter().map(PaymentResponse::from).collect();
            (StatusCode::OK, Json(json!({ "payments": response }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list payments");
            internal_error_response()
        }
    }
}

/// POST `/payments` - Record a payment against a project's budget.
async fn create_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentRequest>,
) -> impl IntoResponse {
    let input = match payment_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = PaymentRepository::new((*state.db).clone());

    match repo.create(input).await {
        Ok(payment) => {
            info!(
                payment_id = %payment.id,
                project_id = %payment.project_id,
                amount = %payment.amount,
                "Payment recorded"
            );
            (StatusCode::CREATED, Json(PaymentResponse::from(payment))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create payment");
            map_payment_error(&e)
        }
    }
}

/// GET `/payments/{payment_id}` - Get a payment.
async fn get_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    match repo.get(payment_id).await {
        Ok(payment) => (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response(),
        Err(e) => map_payment_error(&e),
    }
}

/// PUT `/payments/{payment_id}` - Replace a payment, adjusting the paid total.
async fn update_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> impl IntoResponse {
    let input = match payment_input(payload) {
        Ok(input) => input,
        Err(response) => return response,
    };

    let repo = PaymentRepository::new((*state.db).clone());

    match repo.update(payment_id, input).await {
        Ok(payment) => {
            info!(payment_id = %payment_id, "Payment updated");
            (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to update payment");
            map_payment_error(&e)
        }
    }
}

/// DELETE `/payments/{payment_id}` - Delete a payment, decrementing the paid total.
async fn delete_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    match repo.delete(payment_id).await {
        Ok(()) => {
            info!(payment_id = %payment_id, "Payment deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to delete payment");
            map_payment_error(&e)
        }
    }
}

/// POST `/payments/{payment_id}/receipt` - Upload the payment receipt (PDF).
async fn upload_receipt(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    multipart: Multipart,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    let payment = match repo.get(payment_id).await {
        Ok(payment) => payment,
        Err(e) => return map_payment_error(&e),
    };

    let file = match read_upload(multipart).await {
        Ok(file) => file,
        Err(response) => return response,
    };

    let key = StorageService::receipt_key(payment.id, &file.filename);
    if let Err(e) = state
        .storage
        .store(&key, &file.content_type, file.data)
        .await
    {
        return map_storage_error(&e);
    }

    match repo.set_receipt_path(payment_id, Some(key)).await {
        Ok(payment) => {
            info!(payment_id = %payment_id, "Payment receipt uploaded");
            (StatusCode::OK, Json(PaymentResponse::from(payment))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to record receipt path");
            map_payment_error(&e)
        }
    }
}

/// GET `/payments/{payment_id}/receipt` - Download the payment receipt.
async fn download_receipt(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PaymentRepository::new((*state.db).clone());

    let payment = match repo.get(payment_id).await {
        Ok(payment) => payment,
        Err(e) => return map_payment_error(&e),
    };

    let Some(key) = payment.receipt_path else {
        return app_error_response(&AppError::NotFound("Payment has no receipt".to_string()));
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

/// Builds a repository input, parsing the payment type string.
fn payment_input(payload: PaymentRequest) -> Result<PaymentInput, axum::response::Response> {
    let payment_type = match payload.payment_type.as_deref() {
        None => PaymentType::Cash,
        Some(s) => PaymentType::parse(s).ok_or_else(|| {
            field_error_response(
                "payment_type",
                "Invalid payment type. Must be one of: cash, bank_transfer, cheque, upi, other",
            )
        })?,
    };

    Ok(PaymentInput {
        project_id: payload.project_id,
        amount: payload.amount,
        payment_date: payload.payment_date,
        payment_type,
        description: payload.description,
    })
}

/// Maps payment errors to HTTP responses.
fn map_payment_error(e: &PaymentError) -> axum::response::Response {
    match e {
        PaymentError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Payment not found: {}", id)
            })),
        )
            .into_response(),
        PaymentError::ProjectNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": format!("Project not found: {}", id)
            })),
        )
            .into_response(),
        PaymentError::Funds(funds) => map_funds_error(funds),
        PaymentError::Database(_) => {
            error!(error = %e, "Payment operation failed");
            internal_error_response()
        }
    }
}

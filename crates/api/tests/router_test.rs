//! Router tests for request validation paths that never reach the database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use sitebook_api::{AppState, create_router};
use sitebook_core::storage::{StorageConfig, StorageProvider, StorageService};

/// Router backed by a disconnected database; only handler paths that
/// bail out before any query can be exercised here.
fn test_router() -> axum::Router {
    let storage = StorageService::from_config(StorageConfig::new(StorageProvider::local_fs(
        "./test-storage",
    )))
    .expect("storage init");

    create_router(AppState {
        db: Arc::new(DatabaseConnection::default()),
        storage: Arc::new(storage),
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = test_router()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_index_page_served() {
    let response = test_router()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Construction Tracker"));
}

#[tokio::test]
async fn test_expenses_require_kind() {
    let response = test_router()
        .oneshot(Request::get("/api/expenses").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["fields"]["kind"].is_array());
}

#[tokio::test]
async fn test_expenses_reject_unknown_kind() {
    let response = test_router()
        .oneshot(
            Request::get("/api/expenses?kind=equipment")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_rejects_unknown_granularity() {
    let response = test_router()
        .oneshot(
            Request::get(format!(
                "/api/reports/{}?granularity=weekly",
                uuid::Uuid::nil()
            ))
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["fields"]["granularity"].is_array());
}

#[tokio::test]
async fn test_create_project_rejects_unknown_status() {
    let payload = serde_json::json!({
        "name": "Villa",
        "budget": "100000",
        "status": "planned"
    });

    let response = test_router()
        .oneshot(
            Request::post("/api/projects")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["fields"]["status"].is_array());
}

#[tokio::test]
async fn test_create_project_rejects_empty_name() {
    let payload = serde_json::json!({
        "name": "",
        "budget": "100000"
    });

    let response = test_router()
        .oneshot(
            Request::post("/api/projects")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["fields"]["name"].is_array());
}

#[tokio::test]
async fn test_create_payment_rejects_unknown_type() {
    let payload = serde_json::json!({
        "project_id": uuid::Uuid::nil(),
        "amount": "1000",
        "payment_date": "2026-03-01",
        "payment_type": "barter"
    });

    let response = test_router()
        .oneshot(
            Request::post("/api/payments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["fields"]["payment_type"].is_array());
}

#[tokio::test]
async fn test_create_expense_rejects_unknown_tag() {
    let payload = serde_json::json!({
        "kind": "equipment",
        "project_id": uuid::Uuid::nil(),
        "date": "2026-03-01"
    });

    let response = test_router()
        .oneshot(
            Request::post("/api/expenses")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    // Unknown tag fails body deserialization
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

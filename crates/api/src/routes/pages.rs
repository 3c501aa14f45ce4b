//! Server-rendered page shells.
//!
//! The browser UI is a handful of static pages that talk to `/api`.

use axum::{Router, response::Html, routing::get};

use crate::AppState;

/// Creates the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/projects", get(projects))
        .route("/expenses", get(expenses))
        .route("/payments", get(payments))
        .route("/reports", get(reports))
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

async fn projects() -> Html<&'static str> {
    Html(include_str!("../../templates/projects.html"))
}

async fn expenses() -> Html<&'static str> {
    Html(include_str!("../../templates/expenses.html"))
}

async fn payments() -> Html<&'static str> {
    Html(include_str!("../../templates/payments.html"))
}

async fn reports() -> Html<&'static str> {
    Html(include_str!("../../templates/reports.html"))
}

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use tracing::info;

use crate::db::Database;
use crate::election;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(serde_json::json!({ "message": "ok" }))
}

/// Any unmatched route answers 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// The full application router. The binary and the tests share this so the
/// route set exists exactly once.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(healthcheck))
        .nest("/api", election::routes())
        .fallback(not_found)
        .with_state(state)
}

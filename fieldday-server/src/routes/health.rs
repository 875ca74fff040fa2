//! Health check route

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use fieldday_core::Database;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: DatabaseHealth,
}

#[derive(Serialize)]
struct DatabaseHealth {
    path: String,
    size_bytes: Option<u64>,
}

/// GET /health - liveness check with store details
async fn health(State(db): State<Database>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            path: db.path().display().to_string(),
            size_bytes: db.size_bytes(),
        },
    })
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

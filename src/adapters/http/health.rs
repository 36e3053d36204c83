//! Liveness endpoint.

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Timestamp::now().to_rfc3339(),
    })
}

pub fn health_routes() -> Router {
    Router::new().route("/api/health", get(health))
}

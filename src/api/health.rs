use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    active_sessions: usize,
    seeded: bool,
}

/// GET /health - service status and session count
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        active_sessions: state.sessions.len(),
        seeded: state.cfg.generation.seed.is_some(),
    };
    (StatusCode::OK, Json(response))
}

/// GET /health/live - liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

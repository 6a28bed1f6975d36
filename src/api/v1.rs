use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Router,
};

use super::{campus, dashboard, forecast, health, historical};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/historical", get(historical::get_historical))
        .route("/historical/trends", get(historical::get_trends))
        .route("/historical/export", get(historical::export_historical))
        .route("/hourly", get(campus::get_hourly))
        .route("/hourly/export", get(campus::export_hourly))
        .route("/sensors", get(campus::get_sensors))
        .route("/predictions", get(forecast::get_predictions))
        .route("/live", get(forecast::get_live))
        .route("/dashboard/:mode", get(dashboard::get_dashboard))
        .route("/session/:id", delete(dashboard::close_session))
        .route("/session/:id/cache", delete(dashboard::invalidate_session))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

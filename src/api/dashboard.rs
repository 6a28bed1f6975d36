use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::campus::SessionQuery;
use super::error::{ApiError, ApiResult};
use super::response::ApiResponse;
use crate::{dashboard::Mode, state::AppState};

/// GET /dashboard/:mode - the full page view for a mode with default controls
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(mode): Path<Mode>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<impl IntoResponse> {
    let session = state.session(query.session);
    let view = state
        .dashboard
        .render(&session, mode.into(), query.at_or_now())?;
    Ok(ApiResponse::success(view).with_session(session.id()))
}

/// DELETE /session/:id/cache - drop a session's tables so they regenerate
pub async fn invalidate_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let session = state
        .sessions
        .get(id)
        .ok_or_else(|| ApiError::NotFound(format!("session {id}")))?;
    session.invalidate();
    tracing::info!(session = %id, "session cache invalidated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /session/:id - close a session and release its tables
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !state.sessions.remove(id) {
        return Err(ApiError::NotFound(format!("session {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

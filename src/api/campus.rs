use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use uuid::Uuid;

use super::error::ApiResult;
use super::response::ApiResponse;
use crate::{export, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct SessionQuery {
    pub session: Option<Uuid>,
    /// Reference instant; defaults to local now
    pub at: Option<NaiveDateTime>,
}

impl SessionQuery {
    pub fn at_or_now(&self) -> NaiveDateTime {
        self.at.unwrap_or_else(|| Local::now().naive_local())
    }
}

/// GET /hourly - representative-day profile for the configured buildings
pub async fn get_hourly(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<impl IntoResponse> {
    let session = state.session(query.session);
    let profile = state.dashboard.hourly(&session)?;
    let count = profile.len();
    Ok(ApiResponse::success(profile.to_vec())
        .with_count(count)
        .with_session(session.id()))
}

/// GET /hourly/export - hourly profile as CSV
pub async fn export_hourly(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<impl IntoResponse> {
    let session = state.session(query.session);
    let profile = state.dashboard.hourly(&session)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"campus_hourly_profile.csv\""),
        ],
        export::hourly_csv(&profile),
    ))
}

/// GET /sensors - current reading across all campus sensors
pub async fn get_sensors(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> impl IntoResponse {
    let session = state.session(query.session);
    let snapshot = state.dashboard.sensors(&session, query.at_or_now());
    ApiResponse::success(snapshot).with_session(session.id())
}

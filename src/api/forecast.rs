use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::error::ApiResult;
use super::response::ApiResponse;
use crate::{
    forecast::PredictionParams,
    simulation::{LiveParams, WeatherCondition},
    state::AppState,
};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct PredictionQuery {
    pub session: Option<Uuid>,
    #[validate(range(min = 1, max = 30))]
    pub days_ahead: Option<u32>,
    #[validate(range(min = 50, max = 95))]
    pub confidence: Option<u8>,
    pub at: Option<NaiveDateTime>,
}

impl PredictionQuery {
    pub fn params(&self) -> PredictionParams {
        let defaults = PredictionParams::default();
        PredictionParams {
            days_ahead: self.days_ahead.unwrap_or(defaults.days_ahead),
            confidence: self.confidence.unwrap_or(defaults.confidence),
        }
    }
}

/// GET /predictions - solar, temperature and rainfall outlook
pub async fn get_predictions(
    State(state): State<AppState>,
    Query(query): Query<PredictionQuery>,
) -> ApiResult<impl IntoResponse> {
    query.validate()?;
    let session = state.session(query.session);
    let now = query.at.unwrap_or_else(|| Local::now().naive_local());
    let report = state.dashboard.predictions(&session, now, query.params())?;
    let count = report.predictions.len();
    Ok(ApiResponse::success(report).with_count(count).with_session(session.id()))
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LiveQuery {
    pub session: Option<Uuid>,
    pub weather: Option<WeatherCondition>,
    #[validate(range(max = 100))]
    pub activity: Option<u8>,
    pub at: Option<NaiveDateTime>,
}

impl LiveQuery {
    pub fn params(&self) -> LiveParams {
        let defaults = LiveParams::default();
        LiveParams {
            weather: self.weather.unwrap_or(defaults.weather),
            activity: self.activity.unwrap_or(defaults.activity),
        }
    }
}

/// GET /live - current conditions under the chosen weather and activity
pub async fn get_live(
    State(state): State<AppState>,
    Query(query): Query<LiveQuery>,
) -> ApiResult<impl IntoResponse> {
    query.validate()?;
    let session = state.session(query.session);
    let now = query.at.unwrap_or_else(|| Local::now().naive_local());
    let live = state.dashboard.live(&session, now, query.params())?;
    Ok(ApiResponse::success(live).with_session(session.id()))
}

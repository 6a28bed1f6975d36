use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

use super::error::ApiResult;
use super::response::ApiResponse;
use crate::{
    analysis::{DailyFilter, HistoricalSummary, HistoricalTrends},
    domain::{DailyRecord, Season},
    export,
    state::AppState,
};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct HistoricalQuery {
    pub session: Option<Uuid>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub season: Option<Season>,
    #[validate(range(min = 1, max = 12))]
    pub month: Option<u32>,
}

impl HistoricalQuery {
    /// Missing bounds default to the span of the generated series.
    pub fn filter(&self, history: &[DailyRecord]) -> DailyFilter {
        let covering = DailyFilter::covering(history);
        DailyFilter {
            start_year: self.start_year.unwrap_or(covering.start_year),
            end_year: self.end_year.unwrap_or(covering.end_year),
            season: self.season,
            month: self.month,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoricalResponse {
    pub filter: DailyFilter,
    pub summary: HistoricalSummary,
    pub records: Vec<DailyRecord>,
}

type Selection = (DailyFilter, Vec<DailyRecord>, Arc<[DailyRecord]>);

fn select(state: &AppState, query: &HistoricalQuery) -> ApiResult<Selection> {
    query.validate()?;
    let session = state.session(query.session);
    let history = state.dashboard.history(&session)?;
    let filter = query.filter(&history);
    let records = filter.apply(&history)?;
    Ok((filter, records, history))
}

/// GET /historical - filtered daily table with summary cards
pub async fn get_historical(
    State(state): State<AppState>,
    Query(query): Query<HistoricalQuery>,
) -> ApiResult<impl IntoResponse> {
    let started = Instant::now();
    let (filter, records, history) = select(&state, &query)?;
    let summary = HistoricalSummary::compute(&records, &history)?;
    let count = records.len();

    Ok(ApiResponse::success(HistoricalResponse {
        filter,
        summary,
        records,
    })
    .with_count(count)
    .with_session(query.session.unwrap_or_else(Uuid::nil))
    .with_duration(started.elapsed().as_millis() as u64))
}

/// GET /historical/trends - yearly and monthly chart series
pub async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<HistoricalQuery>,
) -> ApiResult<impl IntoResponse> {
    let (_, records, _) = select(&state, &query)?;
    Ok(ApiResponse::success(HistoricalTrends::compute(&records)))
}

/// GET /historical/export - filtered table as a CSV download
pub async fn export_historical(
    State(state): State<AppState>,
    Query(query): Query<HistoricalQuery>,
) -> ApiResult<impl IntoResponse> {
    let (filter, records, _) = select(&state, &query)?;
    tracing::info!(
        records = records.len(),
        file = %filter.export_file_name(),
        "exporting historical csv"
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filter.export_file_name()),
            ),
        ],
        export::daily_csv(&records),
    ))
}

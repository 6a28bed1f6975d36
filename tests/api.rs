//! HTTP surface tests against the assembled router.

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use campus_sustainability::{api, config::Config, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> (Router, AppState) {
    let mut cfg = Config::default();
    cfg.generation.seed = Some(42);
    let state = AppState::new(cfg.clone()).unwrap();
    (api::router(state.clone(), &cfg), state)
}

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, "GET", uri).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = app();
    let (status, body) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["seeded"], true);

    let (status, _, _) = send(app.clone(), "GET", "/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = send(app, "GET", "/health/live").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_historical_filtered_by_season() {
    let (app, _) = app();
    let uri = "/api/v1/historical?start_year=2020&end_year=2020&season=Winter";
    let (status, body) = get_json(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let records = body["data"]["records"].as_array().unwrap();
    // January, February and December 2020
    assert_eq!(records.len(), 31 + 29 + 31);
    assert!(records.iter().all(|r| r["season"] == "Winter"));
    assert_eq!(body["metadata"]["total_count"], records.len());
    assert_eq!(body["data"]["summary"]["days"], records.len());
}

#[tokio::test]
async fn test_historical_rejects_bad_month() {
    let (app, _) = app();
    let (status, body) = get_json(app, "/api/v1/historical?month=13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
}

#[tokio::test]
async fn test_historical_rejects_inverted_years() {
    let (app, _) = app();
    let (status, body) = get_json(app, "/api/v1/historical?start_year=2020&end_year=2016").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_historical_export_is_csv() {
    let (app, _) = app();
    let uri = "/api/v1/historical/export?start_year=2015&end_year=2016";
    let (status, headers, body) = send(app, "GET", uri).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/csv"));
    assert!(headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("campus_data_2015_2016.csv"));

    let text = String::from_utf8(body).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("date,year,month,day,season"));
    assert_eq!(lines.count(), 365 + 366);
}

#[tokio::test]
async fn test_hourly_profile_and_export() {
    let (app, _) = app();
    let (status, body) = get_json(app.clone(), "/api/v1/hourly").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 24);

    let (status, _, csv) = send(app, "GET", "/api/v1/hourly/export").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(csv).unwrap();
    assert!(text.lines().next().unwrap().contains("demand_hostel"));
    assert_eq!(text.lines().count(), 25);
}

#[tokio::test]
async fn test_sensors_at_night_have_no_solar() {
    let (app, _) = app();
    let (status, body) = get_json(app, "/api/v1/sensors?at=2026-10-14T02:00:00").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["solar"]["power_kw"], 0.0);
    assert_eq!(body["data"]["waste"]["bins"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_predictions_window() {
    let (app, _) = app();
    let uri = "/api/v1/predictions?days_ahead=10&confidence=90&at=2026-10-14T09:00:00";
    let (status, body) = get_json(app.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["predictions"].as_array().unwrap().len(), 10);

    let (status, _) = get_json(app, "/api/v1/predictions?days_ahead=45").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_live_conditions() {
    let (app, _) = app();
    let uri = "/api/v1/live?weather=rainy&activity=80&at=2026-10-14T12:00:00";
    let (status, body) = get_json(app.clone(), uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["weather"], "rainy");
    assert_eq!(body["data"]["curve"].as_array().unwrap().len(), 24);

    let (status, _) = get_json(app, "/api/v1/live?activity=120").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_modes() {
    let (app, _) = app();
    for mode in ["historical", "predictions", "live_simulation", "campus_operations"] {
        let uri = format!("/api/v1/dashboard/{mode}?at=2026-10-14T13:00:00");
        let (status, body) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK, "mode {mode}");
        assert_eq!(body["data"]["mode"], mode);
    }

    let (status, _, _) = send(app, "GET", "/api/v1/dashboard/unknown").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_cache_invalidation() {
    let (app, state) = app();
    let id = uuid::Uuid::new_v4();

    let (status, _, _) = send(app.clone(), "DELETE", &format!("/api/v1/session/{id}/cache")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(app.clone(), &format!("/api/v1/hourly?session={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.sessions.get(id).is_some());

    let (status, _, _) = send(app, "DELETE", &format!("/api/v1/session/{id}/cache")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_closed_sessions_are_released() {
    let (app, state) = app();
    for _ in 0..50 {
        let id = uuid::Uuid::new_v4();
        let uri = format!("/api/v1/historical/trends?session={id}");
        let (status, _) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, _) = send(app.clone(), "DELETE", &format!("/api/v1/session/{id}")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    assert!(state.sessions.is_empty());

    let uri = format!("/api/v1/session/{}", uuid::Uuid::new_v4());
    let (status, _, _) = send(app, "DELETE", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_count_is_capped() {
    let mut cfg = Config::default();
    cfg.generation.seed = Some(42);
    cfg.generation.day_count = 60;
    cfg.sessions.max_sessions = 4;
    let state = AppState::new(cfg.clone()).unwrap();
    let app = api::router(state.clone(), &cfg);

    for _ in 0..20 {
        let uri = format!("/api/v1/hourly?session={}", uuid::Uuid::new_v4());
        let (status, _) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(state.sessions.len(), 4);
}

//! Feed endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::Local;
use kadaical_core::{AcademicYear, Grade, generate_feed};
use serde::Deserialize;
use serde_json::json;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendar", get(feed))
        .route("/health", get(health))
}

/// Query parameters for the feed endpoint. Both are optional; invalid
/// values fall back to defaults instead of failing the request.
#[derive(Deserialize)]
pub struct FeedQuery {
    year: Option<String>,
    grade: Option<String>,
}

/// GET /calendar?year=&grade= - Render one grade's feed
async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let year = AcademicYear::from_param(query.year.as_deref(), today);
    let grade = Grade::from_param(query.grade.as_deref());

    tracing::info!(year = year.0, grade = grade.number(), "rendering feed");
    let body = generate_feed(state.schedule_dir(), year, grade)?;

    Ok(([(header::CONTENT_TYPE, "text/calendar")], body))
}

/// GET /health - Liveness probe
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

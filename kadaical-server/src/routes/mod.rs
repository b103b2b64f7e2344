pub mod calendar;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kadaical_core::FeedError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert feed errors to HTTP responses
pub struct AppError(FeedError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            FeedError::YearNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        Self(err)
    }
}

use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    RateLimited,
    NotConfigured,
    InvalidRequest,
    Upstream(u16),
    EmptyUpstreamResponse,
    MalformedOutput,
    Unknown(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::RateLimited | AppError::InvalidRequest => {
                tracing::warn!("Request rejected: {:?}", self)
            }
            other => tracing::error!("Generation failed: {:?}", other),
        }

        let (status, error) = match self {
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Please wait a minute.",
            ),
            AppError::NotConfigured => {
                (StatusCode::SERVICE_UNAVAILABLE, "AI generation not configured")
            }
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, "Invalid generation type"),
            AppError::Upstream(_)
            | AppError::EmptyUpstreamResponse
            | AppError::MalformedOutput
            | AppError::Unknown(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate content")
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Unknown(err.to_string())
    }
}

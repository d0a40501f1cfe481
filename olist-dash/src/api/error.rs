//! JSON error responses for API handlers
//!
//! A failed pipeline run answers with `{"error": "..."}` and no partial
//! charts. The server keeps serving the next request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// API errors
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    DataUnavailable(String),
    Internal(String),
}

impl From<olist_common::Error> for ApiError {
    fn from(err: olist_common::Error) -> Self {
        use olist_common::Error;
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::MissingSource(_) | Error::Csv { .. } | Error::Timestamp { .. } => {
                ApiError::DataUnavailable(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, format!("Invalid request: {}", msg))
            }
            ApiError::DataUnavailable(msg) => {
                error!("Dataset unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Failed to load data: {}", msg),
                )
            }
            ApiError::Internal(msg) => {
                error!("Pipeline failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error during execution: {}", msg),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

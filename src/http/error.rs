//! HTTP error handling and response types.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::NeoError;

/// Message returned for every failure the caller did not cause.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "API returned invalid response or error. Check logs.";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub struct AppError(pub NeoError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let err = self.0;
        let message = if err.is_client_error() {
            err.to_string()
        } else {
            UPSTREAM_FAILURE_MESSAGE.to_string()
        };
        let body = ApiError {
            code: err.code().to_string(),
            message,
        };

        (err.status_code(), Json(body)).into_response()
    }
}

impl From<NeoError> for AppError {
    fn from(err: NeoError) -> Self {
        AppError(err)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Ingestion errors for a raw activity batch.
///
/// `index` is the position of the offending record in the batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("Record {index}: invalid date {value} (expected YYYYMMDD)")]
    InvalidDate { index: usize, value: u32 },

    #[error("Record {index}: invalid {field} value {value}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid date key: {0}")]
    InvalidDateKey(u32),

    #[error("Unparsable date: {0:?} (expected YYYYMMDD)")]
    UnparsableDate(String),
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid activity data: {0}")]
    InvalidData(#[from] DataError),

    #[error("Training data unavailable: {0}")]
    DataLoad(String),

    #[error("COROS API error: {0}")]
    CorosApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Marker message for an expired or rejected COROS access token.
    pub const COROS_TOKEN_ERROR: &'static str = "COROS access token rejected";

    /// Whether this error means the COROS token must be refreshed.
    pub fn is_coros_token_error(&self) -> bool {
        match self {
            AppError::CorosApi(msg) => {
                let lower = msg.to_lowercase();
                lower.contains("token") || lower.contains("unauthorized")
            }
            _ => false,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::InvalidData(err) => {
                tracing::error!(error = %err, "Activity data failed validation");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "invalid_data",
                    Some(err.to_string()),
                )
            }
            AppError::DataLoad(msg) => {
                tracing::error!(error = %msg, "Training data load failed");
                (StatusCode::SERVICE_UNAVAILABLE, "data_unavailable", None)
            }
            AppError::CorosApi(msg) => {
                (StatusCode::BAD_GATEWAY, "coros_error", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

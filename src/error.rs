//! Unified API error handling
//!
//! Every failure leaves the service as `{status: "error", code, message}`.
//! Lenient inputs (area, floors) never reach this type; they are defaulted
//! during normalization instead.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::NormalizeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidNumericInput(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidNumericInput(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumericInput(_) => "INVALID_NUMERIC_INPUT",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<NormalizeError> for ApiError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::InvalidNumericInput { .. } => Self::InvalidNumericInput(err.to_string()),
            NormalizeError::UnknownCostStrategy(_) => Self::BadRequest(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, "Internal server error");
            }
            _ => {
                tracing::warn!(error = %self, "Rejected request");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            status: "error",
            code: self.error_code().to_string(),
            // Internal failures carry their message; callers rely on it for diagnosis
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Store failures are logged with full detail but answered with a generic,
//! per-operation message; internal error text never reaches the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::extractors::{FieldError, ValidationErrors};
use crate::store::StoreError;

/// JSON body of every non-validation error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// JSON body of a 400 validation failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorBody {
    pub errors: Vec<FieldError>,
}

/// Application-level error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced item does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Field-level validation failed (400).
    #[error("validation error: {0}")]
    Validation(ValidationErrors),

    /// Body could not be parsed as the expected JSON (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Store failure (500). `context` is the only text returned to clients.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the client-facing message for the operation.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { context, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(errors) => {
                tracing::debug!(%errors, "request rejected by validation");
                let body = ValidationErrorBody {
                    errors: errors.into_errors(),
                };
                (status, Json(body)).into_response()
            }
            Self::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                let body = ErrorBody {
                    message: context.to_string(),
                };
                (status, Json(body)).into_response()
            }
            Self::NotFound(message) | Self::BadRequest(message) => {
                tracing::debug!(status = status.as_u16(), %message, "request failed");
                (status, Json(ErrorBody { message })).into_response()
            }
        }
    }
}

//! API error type that converts domain errors to HTTP responses.
//!
//! Every handler returns `Result<_, ApiError>`; the status code is derived
//! from the domain error code so the mapping lives in exactly one place.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error body returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Wrapper turning a [`DomainError`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn not_found(code: ErrorCode, message: impl Into<String>) -> Self {
        Self(DomainError::new(code, message))
    }

    fn status(&self) -> StatusCode {
        match self.0.code {
            ErrorCode::InvalidInput
            | ErrorCode::InvalidDateFormat
            | ErrorCode::InvalidDate
            | ErrorCode::InvalidDateRange
            | ErrorCode::InvalidCycleId
            | ErrorCode::InvalidMood
            | ErrorCode::InvalidFlowLevel => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::CycleNotFound | ErrorCode::NoteNotFound => StatusCode::NOT_FOUND,
            ErrorCode::CycleOverlap => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        // Internals are logged server-side and withheld from the client.
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.0.code, message = %self.0.message, "request failed");
            ErrorResponse {
                code: self.0.code.to_string(),
                message: "Internal server error".to_string(),
                details: None,
            }
        } else {
            ErrorResponse {
                code: self.0.code.to_string(),
                message: self.0.message,
                details: None,
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(code: ErrorCode) -> StatusCode {
        ApiError(DomainError::new(code, "test")).status()
    }

    #[test]
    fn validation_codes_map_to_bad_request() {
        assert_eq!(status_of(ErrorCode::InvalidDateFormat), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::InvalidMood), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::InvalidFlowLevel), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ErrorCode::InvalidCycleId), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lookup_failures_map_to_not_found() {
        assert_eq!(status_of(ErrorCode::CycleNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ErrorCode::NoteNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn overlap_maps_to_conflict() {
        assert_eq!(status_of(ErrorCode::CycleOverlap), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_errors_hide_the_message() {
        let response = ApiError(DomainError::database("insert cycle", "connection reset"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! Authenticated user extraction.
//!
//! The gateway in front of this service authenticates requests and forwards
//! the subject in the `X-User-Id` header. Handlers declare an
//! [`AuthenticatedUser`] parameter; a missing or empty header rejects the
//! request with 401 before the handler body runs.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::error::ErrorResponse;
use crate::domain::foundation::{DomainError, UserId};

/// Authenticated user context extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for [`AuthenticatedUser`] extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let err = DomainError::unauthorized();
        let body = ErrorResponse {
            code: err.code.to_string(),
            message: err.message,
            details: None,
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}

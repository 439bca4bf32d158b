//! Route Handlers

pub mod limits;
pub mod process;
pub mod session;

use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

/// JSON error payload shared by every route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Pull the session token out of a `Authorization: Bearer <uuid>` header.
pub(crate) fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .parse()
        .ok()
}

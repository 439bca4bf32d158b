//! Session Routes
//!
//! A session starts unauthenticated; submitting the shared access code
//! through the gate flips it. Failed checks only report an invalid code;
//! there is no lockout or backoff in the demo.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use access_gate::Session;

use super::{error_response, session_token, ErrorResponse};
use crate::{AppState, SharedState};

/// Response carrying a freshly issued session token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
}

/// Access-code submission
#[derive(Debug, Deserialize)]
pub struct AccessRequest {
    pub access_code: String,
}

/// Start a new (unauthenticated) session.
pub async fn create(State(state): State<SharedState>) -> (StatusCode, Json<SessionResponse>) {
    let session = Session::new();
    let token = session.token;
    state.write().await.sessions.insert(token, session);
    (StatusCode::CREATED, Json(SessionResponse { token }))
}

/// Check the submitted access code against the configured one.
pub async fn access(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<AccessRequest>,
) -> Result<StatusCode, ErrorResponse> {
    let token = session_token(&headers).ok_or_else(|| {
        error_response(StatusCode::UNAUTHORIZED, "missing session token")
    })?;

    let mut guard = state.write().await;
    let AppState { gate, sessions, .. } = &mut *guard;
    let session = sessions.get_mut(&token).ok_or_else(|| {
        error_response(StatusCode::UNAUTHORIZED, "unknown session token")
    })?;

    if gate.check(session, &request.access_code) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(error_response(StatusCode::UNAUTHORIZED, "invalid access code"))
    }
}

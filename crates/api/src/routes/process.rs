//! Processing Route
//!
//! The one endpoint that runs the pipeline. The gate is enforced here, at
//! the boundary: an unauthenticated session never reaches validation.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use data_validator::ValidationError;
use pipeline::{Notice, PipelineError, PREVIEW_ROWS};
use signal_enhancer::ProcessingConfig;
use signal_table::Table;

use super::{error_response, session_token, ErrorResponse};
use crate::SharedState;

/// Caller-tunable slider range for the boost factor.
const BOOST_RANGE: (f64, f64) = (1.0, 2.0);
/// Caller-tunable slider range for the low cutoff (Hz).
const LOWCUT_RANGE: (f64, f64) = (1.0, 20.0);
/// Caller-tunable slider range for the high cutoff (Hz).
const HIGHCUT_RANGE: (f64, f64) = (10.0, 50.0);

/// Query parameters for a processing request.
#[derive(Debug, Deserialize)]
pub struct ProcessParams {
    pub boost: f64,
    pub lowcut: f64,
    pub highcut: f64,
    /// Name of the uploaded file, for logging only
    pub filename: Option<String>,
}

/// First rows of the original and enhanced tables, for display only.
#[derive(Debug, Serialize)]
pub struct Preview {
    pub original: Table,
    pub enhanced: Table,
}

/// Downloadable artifact, inlined since CSV is text anyway.
#[derive(Debug, Serialize)]
pub struct ArtifactResponse {
    pub filename: String,
    pub media_type: String,
    pub content: String,
}

/// Successful processing response.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub watermark: String,
    pub notices: Vec<Notice>,
    pub preview: Preview,
    pub artifact: ArtifactResponse,
}

fn check_range(name: &str, value: f64, range: (f64, f64)) -> Result<(), ErrorResponse> {
    if value < range.0 || value > range.1 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!(
                "{name} {value} is outside the allowed range [{}, {}]",
                range.0, range.1
            ),
        ));
    }
    Ok(())
}

/// Run the demo pipeline over an uploaded CSV body.
pub async fn process_upload(
    State(state): State<SharedState>,
    Query(params): Query<ProcessParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ErrorResponse> {
    let token = session_token(&headers).ok_or_else(|| {
        error_response(StatusCode::UNAUTHORIZED, "missing session token")
    })?;

    // gate enforcement happens here, once; the pipeline stages assume it
    let (limits, sample_rate_hz) = {
        let guard = state.read().await;
        let authenticated = guard
            .sessions
            .get(&token)
            .map(|s| s.is_authenticated())
            .unwrap_or(false);
        if !authenticated {
            return Err(error_response(
                StatusCode::FORBIDDEN,
                "demo access not granted for this session",
            ));
        }
        (guard.settings.limits, guard.settings.sample_rate_hz)
    };

    check_range("boost", params.boost, BOOST_RANGE)?;
    check_range("lowcut", params.lowcut, LOWCUT_RANGE)?;
    check_range("highcut", params.highcut, HIGHCUT_RANGE)?;

    let declared_size = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(body.len() as u64);

    if let Some(filename) = &params.filename {
        info!(session = %token, filename = %filename, bytes = declared_size, "processing upload");
    } else {
        info!(session = %token, bytes = declared_size, "processing upload");
    }

    let config = ProcessingConfig {
        boost_factor: params.boost,
        lowcut_hz: params.lowcut,
        highcut_hz: params.highcut,
        sample_rate_hz,
    };

    let outcome = pipeline::process(
        &body,
        declared_size,
        &config,
        &limits,
        &mut SmallRng::from_os_rng(),
        Utc::now(),
    )
    .map_err(|e| match e {
        PipelineError::Validation(ValidationError::FileTooLarge { .. }) => {
            error_response(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
        }
        PipelineError::Validation(ValidationError::MalformedInput(_)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        PipelineError::Export(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "processing failed while encoding the result",
        ),
    })?;

    let content = String::from_utf8(outcome.artifact.bytes).map_err(|_| {
        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "processing failed while encoding the result",
        )
    })?;

    Ok(Json(ProcessResponse {
        watermark: outcome.watermark,
        notices: outcome.notices,
        preview: Preview {
            original: outcome.original.head(PREVIEW_ROWS),
            enhanced: outcome.enhanced.head(PREVIEW_ROWS),
        },
        artifact: ArtifactResponse {
            filename: outcome.artifact.filename,
            media_type: outcome.artifact.media_type.to_string(),
            content,
        },
    }))
}

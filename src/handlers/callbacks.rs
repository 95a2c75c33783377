use axum::{
    body::{Body, Bytes, to_bytes},
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::ivr::dispatch;
use crate::state::AppState;

/// Largest webhook body read; Event Grid batches stay well below this.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Webhook for Event Grid and Call Automation notifications
///
/// Always answers `200` so the sender never retries a delivery: payloads that
/// cannot be interpreted are acknowledged, and failures while issuing
/// call-control commands are logged and acknowledged. The only non-empty body
/// is the Event Grid subscription validation response.
pub async fn callback_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Body,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to read webhook body, treating it as empty");
            Bytes::new()
        }
    };

    match dispatch(&bytes, &state).await {
        Ok(reply) => reply.into_response(),
        Err(e) => {
            error!(error = %e, "IVR error");
            StatusCode::OK.into_response()
        }
    }
}

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::AppResult;
use crate::events::{EventBatch, classify, normalize_body};
use crate::state::AppState;

use super::{admission, media_controller};

/// Reply to a webhook delivery. Always a `200`.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookReply {
    /// Delivery acknowledged, empty body.
    Accepted,
    /// Event Grid handshake, echoes the validation code.
    SubscriptionValidated(Value),
}

impl IntoResponse for WebhookReply {
    fn into_response(self) -> Response {
        match self {
            WebhookReply::Accepted => StatusCode::OK.into_response(),
            WebhookReply::SubscriptionValidated(code) => (
                StatusCode::OK,
                Json(json!({ "validationResponse": code })),
            )
                .into_response(),
        }
    }
}

/// Process one webhook body.
///
/// Errors are outbound command failures; the caller is expected to log them
/// and still acknowledge the delivery.
pub async fn dispatch(body: &[u8], state: &AppState) -> AppResult<WebhookReply> {
    match classify(normalize_body(body)) {
        EventBatch::Empty => Ok(WebhookReply::Accepted),
        EventBatch::ResourceEvents(events) => {
            admission::handle_resource_events(&events, state).await
        }
        EventBatch::CloudEvents(events) => {
            media_controller::handle_call_events(&events, state).await?;
            Ok(WebhookReply::Accepted)
        }
        EventBatch::Unrecognized => {
            debug!("Unrecognized webhook payload, acknowledging");
            Ok(WebhookReply::Accepted)
        }
    }
}

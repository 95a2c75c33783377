//! Resource-event handling: subscription handshakes and call admission.

use tracing::{debug, info, warn};

use crate::errors::AppResult;
use crate::events::{ResourceEvent, ResourceEventKind};
use crate::state::AppState;

use super::dispatcher::WebhookReply;

/// Handle a batch of resource events in order.
///
/// A subscription validation answers immediately and leaves the rest of the
/// batch unprocessed. Incoming calls are answered with the configured
/// callback URL.
pub async fn handle_resource_events(
    events: &[ResourceEvent],
    state: &AppState,
) -> AppResult<WebhookReply> {
    for event in events {
        match event.kind() {
            ResourceEventKind::SubscriptionValidation { validation_code } => {
                info!(topic = ?event.topic, "Event Grid subscription validation");
                return Ok(WebhookReply::SubscriptionValidated(validation_code));
            }
            ResourceEventKind::IncomingCall {
                incoming_call_context: Some(context),
            } => {
                info!(
                    callback_uri = %state.config.acs.callback_uri,
                    "Answering incoming call"
                );
                state
                    .call_automation
                    .answer_call(&context, &state.config.acs.callback_uri)
                    .await?;
            }
            ResourceEventKind::IncomingCall {
                incoming_call_context: None,
            } => {
                warn!("Incoming call event without incomingCallContext, skipping");
            }
            ResourceEventKind::Other => {
                debug!(event_type = ?event.event_type, "Ignoring resource event");
            }
        }
    }

    Ok(WebhookReply::Accepted)
}

//! In-call event handling: drives the IVR script against a live call.

use tracing::{debug, info, warn};

use crate::acs::{CallConnection, CallMedia, PhoneNumberIdentifier, get_call_connection};
use crate::errors::AppResult;
use crate::events::CloudEvent;
use crate::state::AppState;

use super::script::{CallCommand, IvrStep, plan};

/// Handle a batch of in-call events in order.
///
/// The first failing command aborts the rest of the batch.
pub async fn handle_call_events(events: &[CloudEvent], state: &AppState) -> AppResult<()> {
    for event in events {
        handle_call_event(event, state).await?;
    }
    Ok(())
}

async fn handle_call_event(event: &CloudEvent, state: &AppState) -> AppResult<()> {
    let Some(step) = IvrStep::from_event(event) else {
        debug!(event_type = ?event.event_type, "Ignoring call event");
        return Ok(());
    };

    let Some(call_connection_id) = event.call_connection_id() else {
        debug!(
            event_type = ?event.event_type,
            "Call event without callConnectionId, nothing to control"
        );
        return Ok(());
    };

    let call = get_call_connection(&state.call_automation, call_connection_id);
    let media = call.call_media();

    info!(call_connection_id, step = ?step, "IVR step");

    for command in plan(&step, &state.config.ivr) {
        execute(&call, &media, command).await?;
    }

    Ok(())
}

async fn execute(call: &CallConnection, media: &CallMedia, command: CallCommand) -> AppResult<()> {
    match command {
        CallCommand::Play(play) => {
            debug!(call_connection_id = call.call_connection_id(), text = %play.text, "Playing prompt");
            media.play_to_all(&play).await?;
        }
        CallCommand::Recognize(options) => {
            debug!(
                call_connection_id = call.call_connection_id(),
                input_type = options.input_type().as_str(),
                "Starting recognition"
            );
            media.start_recognizing(&options).await?;
        }
        CallCommand::Transfer { department, target } => {
            match target.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                Some(number) => {
                    info!(
                        call_connection_id = call.call_connection_id(),
                        department = department.as_str(),
                        "Transferring call"
                    );
                    call.transfer_call_to_participant(&PhoneNumberIdentifier::new(number))
                        .await?;
                }
                None => {
                    warn!(
                        call_connection_id = call.call_connection_id(),
                        department = department.as_str(),
                        "No transfer number configured, skipping transfer"
                    );
                }
            }
        }
    }
    Ok(())
}

//! Per-call handles.
//!
//! A [`CallConnection`] is just a call connection id bound to the shared
//! client. Handles are cheap to build and are created per event, never cached.

use std::sync::Arc;

use super::client::CallAutomationApi;
use super::error::AcsResult;
use super::models::{PhoneNumberIdentifier, PlayOptions, RecognizeOptions};

/// Resolve the control handle for a call connection id.
pub fn get_call_connection(
    api: &Arc<dyn CallAutomationApi>,
    call_connection_id: impl Into<String>,
) -> CallConnection {
    CallConnection {
        api: Arc::clone(api),
        call_connection_id: call_connection_id.into(),
    }
}

/// Control handle for a live call.
#[derive(Clone)]
pub struct CallConnection {
    api: Arc<dyn CallAutomationApi>,
    call_connection_id: String,
}

impl CallConnection {
    pub fn call_connection_id(&self) -> &str {
        &self.call_connection_id
    }

    /// Media-control handle of this call.
    pub fn call_media(&self) -> CallMedia {
        CallMedia {
            connection: self.clone(),
        }
    }

    pub async fn transfer_call_to_participant(
        &self,
        target: &PhoneNumberIdentifier,
    ) -> AcsResult<()> {
        self.api
            .transfer_call_to_participant(&self.call_connection_id, target)
            .await
    }
}

impl std::fmt::Debug for CallConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallConnection")
            .field("call_connection_id", &self.call_connection_id)
            .finish()
    }
}

/// Media-control handle for a live call.
#[derive(Debug, Clone)]
pub struct CallMedia {
    connection: CallConnection,
}

impl CallMedia {
    pub fn call_connection_id(&self) -> &str {
        self.connection.call_connection_id()
    }

    pub async fn play_to_all(&self, play: &PlayOptions) -> AcsResult<()> {
        self.connection
            .api
            .play_to_all(&self.connection.call_connection_id, play)
            .await
    }

    pub async fn start_recognizing(&self, options: &RecognizeOptions) -> AcsResult<()> {
        self.connection
            .api
            .start_recognizing(&self.connection.call_connection_id, options)
            .await
    }
}

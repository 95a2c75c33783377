//! In-memory Call Automation double
//!
//! Records every command issued by the dispatcher, in order, and can be told
//! to fail a given operation to exercise the error path.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ivr_gateway::acs::{
    AcsError, AcsResult, CallAutomationApi, PhoneNumberIdentifier, PlayOptions, RecognizeOptions,
};
use ivr_gateway::config::{AcsConfig, IvrConfig, ServerConfig};
use ivr_gateway::state::AppState;

pub const CALLBACK_URI: &str = "https://ivr.contoso.com/api/callbacks";
pub const SALES_NUMBER: &str = "+15550101000";
pub const SUPPORT_NUMBER: &str = "+15550102000";
pub const CONNECTION_STRING: &str =
    "endpoint=https://contoso.communication.azure.com/;accesskey=c2VjcmV0LWtleQ==";

/// One command observed by the double.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Answer {
        incoming_call_context: String,
        callback_uri: String,
    },
    Play {
        call_connection_id: String,
        play: PlayOptions,
    },
    Recognize {
        call_connection_id: String,
        options: RecognizeOptions,
    },
    Transfer {
        call_connection_id: String,
        phone_number: String,
    },
}

/// Operation names accepted by [`MockCallAutomation::failing_on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Answer,
    Play,
    Recognize,
    Transfer,
}

#[derive(Default)]
pub struct MockCallAutomation {
    calls: Mutex<Vec<RecordedCall>>,
    fail_on: Option<Operation>,
}

impl MockCallAutomation {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reject every call to `operation` with a 500 from the service.
    pub fn failing_on(operation: Operation) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(operation),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: Operation, call: RecordedCall) -> AcsResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(operation) {
            return Err(AcsError::Api {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CallAutomationApi for MockCallAutomation {
    async fn answer_call(&self, incoming_call_context: &str, callback_uri: &str) -> AcsResult<()> {
        self.record(
            Operation::Answer,
            RecordedCall::Answer {
                incoming_call_context: incoming_call_context.to_string(),
                callback_uri: callback_uri.to_string(),
            },
        )
    }

    async fn play_to_all(&self, call_connection_id: &str, play: &PlayOptions) -> AcsResult<()> {
        self.record(
            Operation::Play,
            RecordedCall::Play {
                call_connection_id: call_connection_id.to_string(),
                play: play.clone(),
            },
        )
    }

    async fn start_recognizing(
        &self,
        call_connection_id: &str,
        options: &RecognizeOptions,
    ) -> AcsResult<()> {
        self.record(
            Operation::Recognize,
            RecordedCall::Recognize {
                call_connection_id: call_connection_id.to_string(),
                options: options.clone(),
            },
        )
    }

    async fn transfer_call_to_participant(
        &self,
        call_connection_id: &str,
        target: &PhoneNumberIdentifier,
    ) -> AcsResult<()> {
        self.record(
            Operation::Transfer,
            RecordedCall::Transfer {
                call_connection_id: call_connection_id.to_string(),
                phone_number: target.phone_number.clone(),
            },
        )
    }
}

/// Configuration with both transfer numbers set.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3001,
        tls: None,
        acs: AcsConfig {
            connection_string: CONNECTION_STRING.to_string(),
            api_version: "2023-10-15".to_string(),
            callback_uri: CALLBACK_URI.to_string(),
        },
        ivr: IvrConfig {
            tts_voice: "en-IN-NeerjaNeural".to_string(),
            speech_locale: "en-IN".to_string(),
            sales_number: Some(SALES_NUMBER.to_string()),
            support_number: Some(SUPPORT_NUMBER.to_string()),
        },
        cors_allowed_origins: None,
    }
}

pub fn test_state(mock: &Arc<MockCallAutomation>) -> Arc<AppState> {
    state_with_config(test_config(), mock)
}

pub fn state_with_config(config: ServerConfig, mock: &Arc<MockCallAutomation>) -> Arc<AppState> {
    let api: Arc<dyn CallAutomationApi> = mock.clone();
    AppState::with_call_automation(config, api)
}

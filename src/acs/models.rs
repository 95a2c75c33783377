//! Call Automation command options and their REST wire bodies.

use serde::Serialize;

/// Text-to-speech prompt played to every participant of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOptions {
    pub text: String,
    pub voice_name: String,
}

impl PlayOptions {
    pub fn new(text: impl Into<String>, voice_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_name: voice_name.into(),
        }
    }
}

/// Input collected by a recognize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizeInputType {
    Speech,
    Dtmf,
}

impl RecognizeInputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecognizeInputType::Speech => "speech",
            RecognizeInputType::Dtmf => "dtmf",
        }
    }
}

/// Parameters of a start-recognizing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeOptions {
    /// Free speech, ended by a silence of `end_silence_timeout_ms`.
    Speech {
        end_silence_timeout_ms: u64,
        speech_locale: String,
        interrupt_prompt: bool,
    },
    /// Keypad tones.
    ///
    /// `stop_tones: None` leaves the service default in place, `Some(vec![])`
    /// explicitly disables stop tones.
    Dtmf {
        inter_tone_timeout_ms: u64,
        max_tones_to_collect: u32,
        stop_tones: Option<Vec<String>>,
        interrupt_prompt: bool,
    },
}

impl RecognizeOptions {
    pub fn input_type(&self) -> RecognizeInputType {
        match self {
            RecognizeOptions::Speech { .. } => RecognizeInputType::Speech,
            RecognizeOptions::Dtmf { .. } => RecognizeInputType::Dtmf,
        }
    }

    pub fn interrupt_prompt(&self) -> bool {
        match self {
            RecognizeOptions::Speech {
                interrupt_prompt, ..
            }
            | RecognizeOptions::Dtmf {
                interrupt_prompt, ..
            } => *interrupt_prompt,
        }
    }
}

/// PSTN participant identified by phone number (E.164).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumberIdentifier {
    pub phone_number: String,
}

impl PhoneNumberIdentifier {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
        }
    }
}

// =============================================================================
// REST wire bodies
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnswerCallRequest<'a> {
    pub incoming_call_context: &'a str,
    pub callback_uri: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayRequest<'a> {
    pub play_sources: Vec<PlaySource<'a>>,
    pub play_options: PlayRequestOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlaySource<'a> {
    pub kind: &'static str,
    pub text: TextSource<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextSource<'a> {
    pub text: &'a str,
    pub voice_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlayRequestOptions {
    #[serde(rename = "loop")]
    pub loop_prompt: bool,
}

impl<'a> From<&'a PlayOptions> for PlayRequest<'a> {
    fn from(options: &'a PlayOptions) -> Self {
        Self {
            play_sources: vec![PlaySource {
                kind: "text",
                text: TextSource {
                    text: &options.text,
                    voice_name: &options.voice_name,
                },
            }],
            play_options: PlayRequestOptions { loop_prompt: false },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecognizeRequest<'a> {
    pub recognize_input_type: &'static str,
    pub recognize_options: RecognizeRequestOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecognizeRequestOptions<'a> {
    pub interrupt_prompt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_options: Option<SpeechRequestOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtmf_options: Option<DtmfRequestOptions<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpeechRequestOptions {
    pub end_silence_timeout_in_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DtmfRequestOptions<'a> {
    pub inter_tone_timeout_in_seconds: u64,
    pub max_tones_to_collect: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_tones: Option<&'a [String]>,
}

impl<'a> From<&'a RecognizeOptions> for RecognizeRequest<'a> {
    fn from(options: &'a RecognizeOptions) -> Self {
        let recognize_options = match options {
            RecognizeOptions::Speech {
                end_silence_timeout_ms,
                speech_locale,
                interrupt_prompt,
            } => RecognizeRequestOptions {
                interrupt_prompt: *interrupt_prompt,
                speech_language: Some(speech_locale.as_str()),
                speech_options: Some(SpeechRequestOptions {
                    end_silence_timeout_in_ms: *end_silence_timeout_ms,
                }),
                dtmf_options: None,
            },
            RecognizeOptions::Dtmf {
                inter_tone_timeout_ms,
                max_tones_to_collect,
                stop_tones,
                interrupt_prompt,
            } => RecognizeRequestOptions {
                interrupt_prompt: *interrupt_prompt,
                speech_language: None,
                speech_options: None,
                dtmf_options: Some(DtmfRequestOptions {
                    // The REST surface takes whole seconds
                    inter_tone_timeout_in_seconds: inter_tone_timeout_ms.div_ceil(1000),
                    max_tones_to_collect: *max_tones_to_collect,
                    stop_tones: stop_tones.as_deref(),
                }),
            },
        };

        Self {
            recognize_input_type: options.input_type().as_str(),
            recognize_options,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransferToParticipantRequest<'a> {
    pub target_participant: CommunicationIdentifier<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommunicationIdentifier<'a> {
    pub kind: &'static str,
    pub phone_number: PhoneNumberValue<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PhoneNumberValue<'a> {
    pub value: &'a str,
}

impl<'a> From<&'a PhoneNumberIdentifier> for TransferToParticipantRequest<'a> {
    fn from(target: &'a PhoneNumberIdentifier) -> Self {
        Self {
            target_participant: CommunicationIdentifier {
                kind: "phoneNumber",
                phone_number: PhoneNumberValue {
                    value: &target.phone_number,
                },
            },
        }
    }
}

//! The IVR conversation as an explicit state machine.
//!
//! The gateway keeps no per-call memory: the current step is implied by the
//! event the call-control service delivers. [`IvrStep::from_event`] maps an
//! event to a step and [`plan`] turns the step into the ordered commands to
//! issue for it.

use crate::acs::{PlayOptions, RecognizeOptions};
use crate::config::IvrConfig;
use crate::events::{CallEventKind, CloudEvent, RecognizeOutcome};

use super::prompts;

/// Transfer destination offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Sales,
    Support,
}

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Sales => "sales",
            Department::Support => "support",
        }
    }
}

/// Caller's menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Department(Department),
    Invalid,
}

impl MenuChoice {
    /// Interpret the first collected tone. Accepts digits and tone names in
    /// any case (`"1"`, `"one"`, `"ONE"`).
    pub fn from_tones(tones: &[String]) -> Self {
        let first = tones.first().map(|t| t.to_lowercase()).unwrap_or_default();
        match first.as_str() {
            "1" | "one" => MenuChoice::Department(Department::Sales),
            "2" | "two" => MenuChoice::Department(Department::Support),
            _ => MenuChoice::Invalid,
        }
    }
}

/// Step of the IVR conversation triggered by one in-call event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IvrStep {
    /// Call just connected: greet and listen for speech.
    Greeting,
    /// Speech recognized: echo it and offer the keypad menu.
    MenuOffer { transcript: String },
    /// Keypad selection received.
    Route(MenuChoice),
    /// Recognition failed: apologise and ask for a tone again.
    Reprompt,
}

impl IvrStep {
    /// Step for an in-call event, or `None` when the event needs no action.
    pub fn from_event(event: &CloudEvent) -> Option<Self> {
        match event.kind() {
            CallEventKind::CallConnected => Some(IvrStep::Greeting),
            CallEventKind::RecognizeCompleted(RecognizeOutcome::Speech { transcript }) => {
                Some(IvrStep::MenuOffer { transcript })
            }
            CallEventKind::RecognizeCompleted(RecognizeOutcome::Dtmf { tones }) => {
                Some(IvrStep::Route(MenuChoice::from_tones(&tones)))
            }
            CallEventKind::RecognizeFailed => Some(IvrStep::Reprompt),
            CallEventKind::RecognizeCompleted(RecognizeOutcome::Unsupported(_))
            | CallEventKind::Other(_) => None,
        }
    }
}

/// A single call-control command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallCommand {
    Play(PlayOptions),
    Recognize(RecognizeOptions),
    /// Transfer to the department's number; `target` is `None` when no
    /// number is configured.
    Transfer {
        department: Department,
        target: Option<String>,
    },
}

fn speech_recognition(config: &IvrConfig) -> RecognizeOptions {
    RecognizeOptions::Speech {
        end_silence_timeout_ms: prompts::END_SILENCE_TIMEOUT_MS,
        speech_locale: config.speech_locale.clone(),
        interrupt_prompt: true,
    }
}

fn menu_recognition(stop_tones: Option<Vec<String>>) -> RecognizeOptions {
    RecognizeOptions::Dtmf {
        inter_tone_timeout_ms: prompts::INTER_TONE_TIMEOUT_MS,
        max_tones_to_collect: prompts::MAX_TONES_TO_COLLECT,
        stop_tones,
        interrupt_prompt: true,
    }
}

/// Ordered commands for a step.
pub fn plan(step: &IvrStep, config: &IvrConfig) -> Vec<CallCommand> {
    let say = |text: &str| CallCommand::Play(PlayOptions::new(text, config.tts_voice.as_str()));

    match step {
        IvrStep::Greeting => vec![
            say(prompts::GREETING),
            CallCommand::Recognize(speech_recognition(config)),
        ],
        IvrStep::MenuOffer { transcript } => vec![
            say(&prompts::menu_offer(transcript)),
            CallCommand::Recognize(menu_recognition(Some(Vec::new()))),
        ],
        IvrStep::Route(MenuChoice::Department(department)) => {
            let (text, target) = match department {
                Department::Sales => (prompts::CONNECTING_SALES, &config.sales_number),
                Department::Support => (prompts::CONNECTING_SUPPORT, &config.support_number),
            };
            vec![
                say(text),
                CallCommand::Transfer {
                    department: *department,
                    target: target.clone(),
                },
            ]
        }
        IvrStep::Route(MenuChoice::Invalid) => vec![
            say(prompts::INVALID_SELECTION),
            CallCommand::Recognize(menu_recognition(None)),
        ],
        IvrStep::Reprompt => vec![
            say(prompts::RECOGNIZE_FAILED),
            CallCommand::Recognize(menu_recognition(None)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{CALL_CONNECTED, RECOGNIZE_COMPLETED, RECOGNIZE_FAILED};
    use serde_json::json;

    fn ivr_config() -> IvrConfig {
        IvrConfig {
            tts_voice: "en-IN-NeerjaNeural".to_string(),
            speech_locale: "en-IN".to_string(),
            sales_number: Some("+15550001111".to_string()),
            support_number: None,
        }
    }

    fn cloud_event(event_type: &str, data: serde_json::Value) -> CloudEvent {
        CloudEvent::from_value(&json!({
            "type": event_type,
            "source": "calling/callConnections/abc",
            "data": data
        }))
    }

    fn tones(t: &[&str]) -> Vec<String> {
        t.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_menu_choice_from_tones() {
        let sales = MenuChoice::Department(Department::Sales);
        let support = MenuChoice::Department(Department::Support);

        assert_eq!(MenuChoice::from_tones(&tones(&["1"])), sales);
        assert_eq!(MenuChoice::from_tones(&tones(&["one"])), sales);
        assert_eq!(MenuChoice::from_tones(&tones(&["One", "two"])), sales);
        assert_eq!(MenuChoice::from_tones(&tones(&["2"])), support);
        assert_eq!(MenuChoice::from_tones(&tones(&["TWO"])), support);
        assert_eq!(MenuChoice::from_tones(&tones(&["9"])), MenuChoice::Invalid);
        assert_eq!(MenuChoice::from_tones(&tones(&["pound"])), MenuChoice::Invalid);
        assert_eq!(MenuChoice::from_tones(&[]), MenuChoice::Invalid);
    }

    #[test]
    fn test_step_from_events() {
        assert_eq!(
            IvrStep::from_event(&cloud_event(CALL_CONNECTED, json!({"callConnectionId": "abc"}))),
            Some(IvrStep::Greeting)
        );
        assert_eq!(
            IvrStep::from_event(&cloud_event(
                RECOGNIZE_COMPLETED,
                json!({"recognizeResult": {"recognizeInputType": "speech", "speechResult": {"speechText": "hi"}}})
            )),
            Some(IvrStep::MenuOffer {
                transcript: "hi".to_string()
            })
        );
        assert_eq!(
            IvrStep::from_event(&cloud_event(
                RECOGNIZE_COMPLETED,
                json!({"recognizeResult": {"recognizeInputType": "dtmf", "dtmfResult": {"tones": ["2"]}}})
            )),
            Some(IvrStep::Route(MenuChoice::Department(Department::Support)))
        );
        assert_eq!(
            IvrStep::from_event(&cloud_event(RECOGNIZE_FAILED, json!({"callConnectionId": "abc"}))),
            Some(IvrStep::Reprompt)
        );
    }

    #[test]
    fn test_unhandled_events_have_no_step() {
        assert_eq!(
            IvrStep::from_event(&cloud_event(
                RECOGNIZE_COMPLETED,
                json!({"recognizeResult": {"recognizeInputType": "choices"}})
            )),
            None
        );
        assert_eq!(
            IvrStep::from_event(&cloud_event(
                "Microsoft.Communication.CallDisconnected",
                json!({"callConnectionId": "abc"})
            )),
            None
        );
    }

    #[test]
    fn test_plan_greeting() {
        let commands = plan(&IvrStep::Greeting, &ivr_config());
        assert_eq!(
            commands,
            vec![
                CallCommand::Play(PlayOptions::new(prompts::GREETING, "en-IN-NeerjaNeural")),
                CallCommand::Recognize(RecognizeOptions::Speech {
                    end_silence_timeout_ms: 1200,
                    speech_locale: "en-IN".to_string(),
                    interrupt_prompt: true,
                }),
            ]
        );
    }

    #[test]
    fn test_plan_menu_offer_uses_explicit_empty_stop_tones() {
        let commands = plan(
            &IvrStep::MenuOffer {
                transcript: "I need help".to_string(),
            },
            &ivr_config(),
        );
        assert_eq!(commands.len(), 2);
        let CallCommand::Play(play) = &commands[0] else {
            panic!("expected play first");
        };
        assert!(play.text.contains("You said: I need help."));
        assert!(play.text.ends_with(prompts::MENU));
        assert_eq!(
            commands[1],
            CallCommand::Recognize(RecognizeOptions::Dtmf {
                inter_tone_timeout_ms: 5000,
                max_tones_to_collect: 1,
                stop_tones: Some(Vec::new()),
                interrupt_prompt: true,
            })
        );
    }

    #[test]
    fn test_plan_route_to_sales() {
        let commands = plan(
            &IvrStep::Route(MenuChoice::Department(Department::Sales)),
            &ivr_config(),
        );
        assert_eq!(
            commands,
            vec![
                CallCommand::Play(PlayOptions::new("Connecting you to Sales.", "en-IN-NeerjaNeural")),
                CallCommand::Transfer {
                    department: Department::Sales,
                    target: Some("+15550001111".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_plan_route_to_unconfigured_support() {
        let commands = plan(
            &IvrStep::Route(MenuChoice::Department(Department::Support)),
            &ivr_config(),
        );
        assert_eq!(
            commands[1],
            CallCommand::Transfer {
                department: Department::Support,
                target: None,
            }
        );
    }

    #[test]
    fn test_plan_invalid_and_reprompt_restart_menu() {
        let retry = CallCommand::Recognize(RecognizeOptions::Dtmf {
            inter_tone_timeout_ms: 5000,
            max_tones_to_collect: 1,
            stop_tones: None,
            interrupt_prompt: true,
        });

        let invalid = plan(&IvrStep::Route(MenuChoice::Invalid), &ivr_config());
        assert_eq!(
            invalid,
            vec![
                CallCommand::Play(PlayOptions::new(prompts::INVALID_SELECTION, "en-IN-NeerjaNeural")),
                retry.clone(),
            ]
        );

        let reprompt = plan(&IvrStep::Reprompt, &ivr_config());
        assert_eq!(
            reprompt,
            vec![
                CallCommand::Play(PlayOptions::new(prompts::RECOGNIZE_FAILED, "en-IN-NeerjaNeural")),
                retry,
            ]
        );
    }
}

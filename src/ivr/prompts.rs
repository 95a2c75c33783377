//! Prompt text and recognition timing used by the IVR script.

pub const GREETING: &str =
    "Welcome to Contoso. Please briefly say your reason for calling after the tone.";
pub const MENU: &str = "For Sales, press 1. For Support, press 2.";
pub const NOTHING_HEARD: &str = "I didn't catch that.";
pub const CONNECTING_SALES: &str = "Connecting you to Sales.";
pub const CONNECTING_SUPPORT: &str = "Connecting you to Support.";
pub const INVALID_SELECTION: &str =
    "Invalid selection. For Sales, press 1. For Support, press 2.";
pub const RECOGNIZE_FAILED: &str =
    "Sorry, I didn't get that. For Sales, press 1. For Support, press 2.";

/// Silence after speech that ends the caller's utterance.
pub const END_SILENCE_TIMEOUT_MS: u64 = 1200;
/// Maximum gap between keypad tones.
pub const INTER_TONE_TIMEOUT_MS: u64 = 5000;
pub const MAX_TONES_TO_COLLECT: u32 = 1;

/// Menu prompt played after a speech result.
pub fn menu_offer(transcript: &str) -> String {
    if transcript.trim().is_empty() {
        format!("{NOTHING_HEARD} {MENU}")
    } else {
        format!("You said: {transcript}. {MENU}")
    }
}

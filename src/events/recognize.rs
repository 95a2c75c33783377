//! Recognition results embedded in `RecognizeCompleted` events.

use serde_json::Value;

/// Outcome of a completed recognize operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeOutcome {
    /// Speech result; empty transcript when the service sent none.
    Speech { transcript: String },
    /// Collected keypad tones, in order.
    Dtmf { tones: Vec<String> },
    /// Any other recognition kind (e.g. `choices`), carried lowercased.
    Unsupported(String),
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl RecognizeOutcome {
    /// Read the outcome from `data` of a `RecognizeCompleted` event.
    ///
    /// The result is taken from `data.recognizeResult` when that object is
    /// present, otherwise from `data` itself. The kind is the first non-empty
    /// of `recognizeInputType`, `kind` and `data.recognitionType`, matched
    /// case-insensitively by substring.
    pub fn from_event_data(data: &Value) -> Self {
        let result = data
            .get("recognizeResult")
            .filter(|r| r.is_object())
            .unwrap_or(data);

        let kind = [
            result.get("recognizeInputType"),
            result.get("kind"),
            data.get("recognitionType"),
        ]
        .into_iter()
        .flatten()
        .map(value_to_text)
        .find(|k| !k.is_empty() && k != "null")
        .unwrap_or_default()
        .to_lowercase();

        if kind.contains("speech") {
            let speech = result.get("speechResult");
            let transcript = speech
                .and_then(|s| s.get("speechText").or_else(|| s.get("speech")))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            RecognizeOutcome::Speech { transcript }
        } else if kind.contains("dtmf") {
            let tones = result
                .get("dtmfResult")
                .and_then(|d| d.get("tones"))
                .and_then(Value::as_array)
                .map(|tones| tones.iter().map(value_to_text).collect())
                .unwrap_or_default();
            RecognizeOutcome::Dtmf { tones }
        } else {
            RecognizeOutcome::Unsupported(kind)
        }
    }
}

//! Body normalization and batch classification.

use serde_json::Value;

use super::recognize::RecognizeOutcome;
use super::{
    CALL_CONNECTED, INCOMING_CALL, RECOGNIZE_COMPLETED, RECOGNIZE_FAILED,
    SUBSCRIPTION_VALIDATION,
};

/// Loose truthiness used for field-presence checks on untyped payloads.
///
/// `null`, `false`, `0`, `""` and missing fields are falsy; every array and
/// object (even empty) is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Turn a raw request body into an ordered list of envelopes.
///
/// Accepts a JSON array, a single object, or a JSON string wrapping either.
/// Anything that cannot be interpreted degrades to a single opaque envelope;
/// an empty body yields no envelopes. Never fails.
pub fn normalize_body(body: &[u8]) -> Vec<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Vec::new();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => normalize_value(value),
        Err(_) => vec![Value::String(String::from_utf8_lossy(body).into_owned())],
    }
}

fn normalize_value(value: Value) -> Vec<Value> {
    if !is_truthy(Some(&value)) {
        return Vec::new();
    }

    match value {
        Value::Array(items) => items,
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(object @ Value::Object(_)) => vec![object],
            Ok(Value::Null) => Vec::new(),
            _ => vec![Value::String(raw)],
        },
        other => vec![other],
    }
}

/// Event Grid shaped envelope: `(eventType || topic) && data`.
pub fn is_resource_event(envelope: &Value) -> bool {
    (is_truthy(envelope.get("eventType")) || is_truthy(envelope.get("topic")))
        && is_truthy(envelope.get("data"))
}

/// CloudEvents shaped envelope: `type && source && data`.
pub fn is_cloud_event(envelope: &Value) -> bool {
    is_truthy(envelope.get("type"))
        && is_truthy(envelope.get("source"))
        && is_truthy(envelope.get("data"))
}

/// Notification family of a batch, decided from its first envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum EventBatch {
    Empty,
    ResourceEvents(Vec<ResourceEvent>),
    CloudEvents(Vec<CloudEvent>),
    Unrecognized,
}

/// Classify a batch. Only the first envelope is inspected; the result
/// applies to every envelope in the batch.
pub fn classify(envelopes: Vec<Value>) -> EventBatch {
    let Some(first) = envelopes.first() else {
        return EventBatch::Empty;
    };

    if is_resource_event(first) {
        EventBatch::ResourceEvents(envelopes.iter().map(ResourceEvent::from_value).collect())
    } else if is_cloud_event(first) {
        EventBatch::CloudEvents(envelopes.iter().map(CloudEvent::from_value).collect())
    } else {
        EventBatch::Unrecognized
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

// =============================================================================
// Resource events (Event Grid)
// =============================================================================

/// Event Grid notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEvent {
    pub event_type: Option<String>,
    pub topic: Option<String>,
    pub data: Value,
}

/// What an Event Grid notification asks the gateway to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEventKind {
    /// Subscription handshake; the code is echoed back verbatim.
    SubscriptionValidation { validation_code: Value },
    /// A new inbound call waiting to be answered.
    IncomingCall { incoming_call_context: Option<String> },
    Other,
}

impl ResourceEvent {
    pub fn from_value(value: &Value) -> Self {
        Self {
            event_type: string_field(value, "eventType"),
            topic: string_field(value, "topic"),
            data: value.get("data").cloned().unwrap_or(Value::Null),
        }
    }

    pub fn kind(&self) -> ResourceEventKind {
        match self.event_type.as_deref() {
            Some(SUBSCRIPTION_VALIDATION) => ResourceEventKind::SubscriptionValidation {
                validation_code: self
                    .data
                    .get("validationCode")
                    .cloned()
                    .unwrap_or(Value::Null),
            },
            Some(INCOMING_CALL) => ResourceEventKind::IncomingCall {
                incoming_call_context: string_field(&self.data, "incomingCallContext")
                    .filter(|ctx| !ctx.is_empty()),
            },
            _ => ResourceEventKind::Other,
        }
    }
}

// =============================================================================
// Cloud events (Call Automation)
// =============================================================================

/// Call Automation notification delivered as a CloudEvent.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEvent {
    pub event_type: Option<String>,
    pub source: Option<String>,
    pub data: Value,
}

/// In-call event types the IVR script reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum CallEventKind {
    CallConnected,
    RecognizeCompleted(RecognizeOutcome),
    RecognizeFailed,
    Other(String),
}

impl CloudEvent {
    pub fn from_value(value: &Value) -> Self {
        let data = match value.get("data") {
            Some(data) if is_truthy(Some(data)) => data.clone(),
            _ => Value::Object(Default::default()),
        };

        Self {
            event_type: string_field(value, "type"),
            source: string_field(value, "source"),
            data,
        }
    }

    /// `data.callConnectionId`, when present and non-empty.
    pub fn call_connection_id(&self) -> Option<&str> {
        self.data
            .get("callConnectionId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn kind(&self) -> CallEventKind {
        match self.event_type.as_deref() {
            Some(CALL_CONNECTED) => CallEventKind::CallConnected,
            Some(RECOGNIZE_COMPLETED) => {
                CallEventKind::RecognizeCompleted(RecognizeOutcome::from_event_data(&self.data))
            }
            Some(RECOGNIZE_FAILED) => CallEventKind::RecognizeFailed,
            other => CallEventKind::Other(other.unwrap_or_default().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_empty_body() {
        assert!(normalize_body(b"").is_empty());
        assert!(normalize_body(b"   \n").is_empty());
        assert!(normalize_body(b"null").is_empty());
        assert!(normalize_body(b"\"\"").is_empty());
    }

    #[test]
    fn test_normalize_single_object() {
        let envelopes = normalize_body(br#"{"type":"a"}"#);
        assert_eq!(envelopes, vec![json!({"type": "a"})]);
    }

    #[test]
    fn test_normalize_array_preserves_order() {
        let envelopes = normalize_body(br#"[{"n":1},{"n":2},{"n":3}]"#);
        assert_eq!(envelopes.len(), 3);
        assert_eq!(envelopes[0]["n"], 1);
        assert_eq!(envelopes[2]["n"], 3);
    }

    #[test]
    fn test_normalize_json_string_wrapping_array() {
        let inner = r#"[{"n":1},{"n":2}]"#;
        let body = serde_json::to_vec(&Value::String(inner.to_string())).unwrap();
        let envelopes = normalize_body(&body);
        assert_eq!(envelopes, vec![json!({"n": 1}), json!({"n": 2})]);
    }

    #[test]
    fn test_normalize_json_string_wrapping_object() {
        let body = serde_json::to_vec(&Value::String(r#"{"n":1}"#.to_string())).unwrap();
        assert_eq!(normalize_body(&body), vec![json!({"n": 1})]);
    }

    #[test]
    fn test_normalize_malformed_json_string_is_opaque() {
        let body = serde_json::to_vec(&Value::String("{not json".to_string())).unwrap();
        assert_eq!(normalize_body(&body), vec![json!("{not json")]);
    }

    #[test]
    fn test_normalize_invalid_json_body_is_opaque() {
        let envelopes = normalize_body(b"eventType=foo&data=bar");
        assert_eq!(envelopes, vec![json!("eventType=foo&data=bar")]);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!({}))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!("x"))));
        assert!(is_truthy(Some(&json!(1))));
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(Vec::new()), EventBatch::Empty);
    }

    #[test]
    fn test_classify_resource_event_by_event_type() {
        let batch = classify(vec![json!({
            "eventType": INCOMING_CALL,
            "data": {"incomingCallContext": "ctx1"}
        })]);
        let EventBatch::ResourceEvents(events) = batch else {
            panic!("expected resource events");
        };
        assert_eq!(
            events[0].kind(),
            ResourceEventKind::IncomingCall {
                incoming_call_context: Some("ctx1".to_string())
            }
        );
    }

    #[test]
    fn test_classify_resource_event_by_topic() {
        let batch = classify(vec![json!({"topic": "/subscriptions/x", "data": {"a": 1}})]);
        assert!(matches!(batch, EventBatch::ResourceEvents(ref e) if e[0].kind() == ResourceEventKind::Other));
    }

    #[test]
    fn test_classify_cloud_event() {
        let batch = classify(vec![json!({
            "type": CALL_CONNECTED,
            "source": "calling/callConnections/abc",
            "data": {"callConnectionId": "abc"}
        })]);
        let EventBatch::CloudEvents(events) = batch else {
            panic!("expected cloud events");
        };
        assert_eq!(events[0].kind(), CallEventKind::CallConnected);
        assert_eq!(events[0].call_connection_id(), Some("abc"));
    }

    #[test]
    fn test_classify_resource_shape_wins_over_cloud_shape() {
        let batch = classify(vec![json!({
            "eventType": "x",
            "type": CALL_CONNECTED,
            "source": "s",
            "data": {"callConnectionId": "abc"}
        })]);
        assert!(matches!(batch, EventBatch::ResourceEvents(_)));
    }

    #[test]
    fn test_classify_uses_first_envelope_only() {
        // Second element looks like a cloud event but the batch follows the first
        let batch = classify(vec![
            json!({"eventType": INCOMING_CALL, "data": {"incomingCallContext": "c"}}),
            json!({"type": CALL_CONNECTED, "source": "s", "data": {"callConnectionId": "a"}}),
        ]);
        let EventBatch::ResourceEvents(events) = batch else {
            panic!("expected resource events");
        };
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].kind(), ResourceEventKind::Other);
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify(vec![json!({"hello": "world"})]), EventBatch::Unrecognized);
        assert_eq!(classify(vec![json!("opaque")]), EventBatch::Unrecognized);
        // data present but falsy
        assert_eq!(
            classify(vec![json!({"eventType": INCOMING_CALL, "data": null})]),
            EventBatch::Unrecognized
        );
    }

    #[test]
    fn test_subscription_validation_code_is_echoed_verbatim() {
        let event = ResourceEvent::from_value(&json!({
            "eventType": SUBSCRIPTION_VALIDATION,
            "data": {"validationCode": "abc123"}
        }));
        assert_eq!(
            event.kind(),
            ResourceEventKind::SubscriptionValidation {
                validation_code: json!("abc123")
            }
        );
    }

    #[test]
    fn test_incoming_call_without_context() {
        let event = ResourceEvent::from_value(&json!({
            "eventType": INCOMING_CALL,
            "data": {"incomingCallContext": ""}
        }));
        assert_eq!(
            event.kind(),
            ResourceEventKind::IncomingCall {
                incoming_call_context: None
            }
        );
    }

    #[test]
    fn test_cloud_event_missing_call_connection_id() {
        let event = CloudEvent::from_value(&json!({
            "type": CALL_CONNECTED,
            "source": "s",
            "data": {"callConnectionId": ""}
        }));
        assert_eq!(event.call_connection_id(), None);

        let event = CloudEvent::from_value(&json!({"type": CALL_CONNECTED}));
        assert_eq!(event.call_connection_id(), None);
        assert_eq!(event.data, json!({}));
    }

    #[test]
    fn test_cloud_event_other_type() {
        let event = CloudEvent::from_value(&json!({
            "type": "Microsoft.Communication.PlayCompleted",
            "source": "s",
            "data": {"callConnectionId": "abc"}
        }));
        assert_eq!(
            event.kind(),
            CallEventKind::Other("Microsoft.Communication.PlayCompleted".to_string())
        );
    }
}

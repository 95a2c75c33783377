//! Inbound notification decoding
//!
//! Webhook bodies arrive in two families:
//! - resource events (Event Grid): subscription validation and incoming calls
//! - cloud events (Call Automation): in-call media events
//!
//! [`normalize_body`] turns any accepted body shape into a list of envelopes and
//! [`classify`] decides the family of the whole batch from its first envelope.

pub mod envelope;
pub mod recognize;

pub use envelope::{
    CallEventKind, CloudEvent, EventBatch, ResourceEvent, ResourceEventKind, classify,
    is_cloud_event, is_resource_event, is_truthy, normalize_body,
};
pub use recognize::RecognizeOutcome;

pub const SUBSCRIPTION_VALIDATION: &str = "Microsoft.EventGrid.SubscriptionValidationEvent";
pub const INCOMING_CALL: &str = "Microsoft.Communication.IncomingCall";
pub const CALL_CONNECTED: &str = "Microsoft.Communication.CallConnected";
pub const RECOGNIZE_COMPLETED: &str = "Microsoft.Communication.RecognizeCompleted";
pub const RECOGNIZE_FAILED: &str = "Microsoft.Communication.RecognizeFailed";

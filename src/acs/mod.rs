//! Azure Communication Services Call Automation integration
//!
//! This module is the outbound side of the gateway: everything that issues
//! commands to the call-control service lives here.
//! - `client` - [`CallAutomationApi`] trait and its REST implementation
//! - `call` - per-call [`CallConnection`] / [`CallMedia`] handles
//! - `models` - command options and wire bodies
//! - `auth` - HMAC request signing
//! - `connection_string` - `endpoint=...;accesskey=...` parsing

pub mod auth;
pub mod call;
pub mod client;
pub mod connection_string;
pub mod error;
pub mod models;

pub use call::{CallConnection, CallMedia, get_call_connection};
pub use client::{CallAutomationApi, CallAutomationClient, DEFAULT_API_VERSION};
pub use connection_string::ConnectionString;
pub use error::{AcsError, AcsResult};
pub use models::{PhoneNumberIdentifier, PlayOptions, RecognizeInputType, RecognizeOptions};

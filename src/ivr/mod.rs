//! IVR webhook dispatch
//!
//! - `dispatcher` - entry point: body -> classified batch -> handler
//! - `admission` - subscription validation and answering incoming calls
//! - `media_controller` - runs the IVR script for in-call events
//! - `script` - conversation steps and the commands each one issues
//! - `prompts` - prompt text and recognition timing

pub mod admission;
pub mod dispatcher;
pub mod media_controller;
pub mod prompts;
pub mod script;

pub use dispatcher::{WebhookReply, dispatch};
pub use script::{CallCommand, Department, IvrStep, MenuChoice, plan};

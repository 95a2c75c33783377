//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `callbacks` - Event Grid and Call Automation webhook

pub mod api;
pub mod callbacks;

pub use callbacks::callback_handler;

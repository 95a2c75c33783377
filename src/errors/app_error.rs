use thiserror::Error;

use crate::acs::AcsError;

/// Application-level errors raised while handling a webhook request.
///
/// None of these ever reach the caller as a non-200 response; the webhook
/// handler logs them and acknowledges the delivery anyway.
#[derive(Debug, Error)]
pub enum AppError {
    /// A call-control command was rejected or could not be sent.
    #[error("Call automation error: {0}")]
    CallAutomation(#[from] AcsError),

    /// Configuration could not be turned into runtime state.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

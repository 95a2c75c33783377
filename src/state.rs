use std::sync::Arc;

use crate::acs::{CallAutomationApi, CallAutomationClient};
use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};

/// Process-wide state shared by every request.
///
/// Immutable after start-up: configuration plus the single call-control
/// client used for all outbound commands.
pub struct AppState {
    pub config: ServerConfig,
    pub call_automation: Arc<dyn CallAutomationApi>,
}

impl AppState {
    /// Build the state with a REST client created from the configured
    /// connection string.
    pub fn new(config: ServerConfig) -> AppResult<Arc<Self>> {
        let client = CallAutomationClient::from_connection_string(
            &config.acs.connection_string,
            &config.acs.api_version,
        )
        .map_err(|e| AppError::Config(e.to_string()))?;

        tracing::info!(
            endpoint = %client.endpoint(),
            api_version = client.api_version(),
            "Call Automation client initialized"
        );

        Ok(Self::with_call_automation(config, Arc::new(client)))
    }

    /// Build the state around an existing call-control implementation.
    pub fn with_call_automation(
        config: ServerConfig,
        call_automation: Arc<dyn CallAutomationApi>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            call_automation,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("address", &self.config.address())
            .field("callback_uri", &self.config.acs.callback_uri)
            .finish_non_exhaustive()
    }
}

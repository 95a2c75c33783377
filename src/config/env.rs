//! Environment variable loading

use super::utils::env_var;
use super::{ServerConfig, merge, validation};

pub(super) const HOST: &str = "HOST";
pub(super) const PORT: &str = "PORT";
pub(super) const TLS_ENABLED: &str = "TLS_ENABLED";
pub(super) const TLS_CERT_PATH: &str = "TLS_CERT_PATH";
pub(super) const TLS_KEY_PATH: &str = "TLS_KEY_PATH";
pub(super) const ACS_CONNECTION_STRING: &str = "ACS_CONNECTION_STRING";
pub(super) const ACS_API_VERSION: &str = "ACS_API_VERSION";
pub(super) const PUBLIC_CALLBACK_URI: &str = "PUBLIC_CALLBACK_URI";
pub(super) const SALES_NUMBER: &str = "SALES_NUMBER";
pub(super) const SUPPORT_NUMBER: &str = "SUPPORT_NUMBER";
pub(super) const TTS_VOICE: &str = "TTS_VOICE";
pub(super) const SPEECH_LOCALE: &str = "SPEECH_LOCALE";
pub(super) const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";

/// Raw values read from the process environment. Blank values count as unset.
#[derive(Debug, Default)]
pub(super) struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<String>,
    pub tls_enabled: Option<String>,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
    pub acs_connection_string: Option<String>,
    pub acs_api_version: Option<String>,
    pub public_callback_uri: Option<String>,
    pub sales_number: Option<String>,
    pub support_number: Option<String>,
    pub tts_voice: Option<String>,
    pub speech_locale: Option<String>,
    pub cors_allowed_origins: Option<String>,
}

impl EnvConfig {
    pub(super) fn load() -> Self {
        Self {
            host: env_var(HOST),
            port: env_var(PORT),
            tls_enabled: env_var(TLS_ENABLED),
            tls_cert_path: env_var(TLS_CERT_PATH),
            tls_key_path: env_var(TLS_KEY_PATH),
            acs_connection_string: env_var(ACS_CONNECTION_STRING),
            acs_api_version: env_var(ACS_API_VERSION),
            public_callback_uri: env_var(PUBLIC_CALLBACK_URI),
            sales_number: env_var(SALES_NUMBER),
            support_number: env_var(SUPPORT_NUMBER),
            tts_voice: env_var(TTS_VOICE),
            speech_locale: env_var(SPEECH_LOCALE),
            cors_allowed_origins: env_var(CORS_ALLOWED_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Unset values fall back to defaults; `ACS_CONNECTION_STRING` and
    /// `PUBLIC_CALLBACK_URI` are required.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing, a value has an
    /// invalid format, or validation fails.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        validation::validate_config(config)
    }
}

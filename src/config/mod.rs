//! Configuration module for the IVR gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use ivr_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TTS_VOICE: &str = "en-IN-NeerjaNeural";
pub const DEFAULT_SPEECH_LOCALE: &str = "en-IN";

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// Call Automation connection settings
#[derive(Clone)]
pub struct AcsConfig {
    /// `endpoint=https://...;accesskey=...` connection string
    pub connection_string: String,
    /// REST `api-version` query value
    pub api_version: String,
    /// Public URL the service delivers in-call events to
    pub callback_uri: String,
}

impl std::fmt::Debug for AcsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcsConfig")
            .field("connection_string", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("callback_uri", &self.callback_uri)
            .finish()
    }
}

/// IVR script settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvrConfig {
    /// Neural voice used for every prompt
    pub tts_voice: String,
    /// Locale for speech recognition
    pub speech_locale: String,
    /// Transfer target for menu option 1 (normalized E.164)
    pub sales_number: Option<String>,
    /// Transfer target for menu option 2 (normalized E.164)
    pub support_number: Option<String>,
}

impl Default for IvrConfig {
    fn default() -> Self {
        Self {
            tts_voice: DEFAULT_TTS_VOICE.to_string(),
            speech_locale: DEFAULT_SPEECH_LOCALE.to_string(),
            sales_number: None,
            support_number: None,
        }
    }
}

/// Server configuration
///
/// Contains all configuration needed to run the IVR gateway:
/// - Server settings (host, port, TLS)
/// - Call Automation connection and callback URL
/// - IVR prompts voice, speech locale and transfer numbers
/// - Security settings (CORS)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    // Call Automation
    pub acs: AcsConfig,

    // IVR script
    pub ivr: IvrConfig,

    // Security settings
    /// Comma-separated list of allowed CORS origins, or "*" for any.
    /// Default: None (same-origin only)
    pub cors_allowed_origins: Option<String>,
}

/// Zeroize the connection string (it embeds the access key) when the
/// configuration is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.acs.connection_string.zeroize();
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file with environment variable base
    ///
    /// Environment variables (with defaults) form the base configuration and
    /// YAML values override them. `.env` is loaded into the environment by
    /// `main` before this is called.
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - A required value is missing or validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;

        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate_config(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if TLS is enabled
    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }
}

use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present here
/// override the corresponding environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///   tls:
///     enabled: true
///     cert_path: "/etc/ivr/cert.pem"
///     key_path: "/etc/ivr/key.pem"
///
/// acs:
///   connection_string: "endpoint=https://contoso.communication.azure.com/;accesskey=..."
///   api_version: "2023-10-15"
///   callback_uri: "https://ivr.contoso.com/api/callbacks"
///
/// ivr:
///   tts_voice: "en-IN-NeerjaNeural"
///   speech_locale: "en-IN"
///   sales_number: "+15550101000"
///   support_number: "+15550102000"
///
/// security:
///   cors_allowed_origins: "https://portal.contoso.com"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub acs: Option<AcsYaml>,
    pub ivr: Option<IvrYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Call Automation configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AcsYaml {
    pub connection_string: Option<String>,
    pub api_version: Option<String>,
    pub callback_uri: Option<String>,
}

/// IVR script configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct IvrYaml {
    pub tts_voice: Option<String>,
    pub speech_locale: Option<String>,
    pub sales_number: Option<String>,
    pub support_number: Option<String>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allowed_origins: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

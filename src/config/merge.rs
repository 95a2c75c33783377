//! Merging of YAML and environment configuration

use std::path::PathBuf;

use crate::acs::DEFAULT_API_VERSION;

use super::env::{self, EnvConfig};
use super::utils::{non_empty, parse_bool, parse_port};
use super::yaml::{TlsYaml, YamlConfig};
use super::{
    AcsConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SPEECH_LOCALE, DEFAULT_TTS_VOICE, IvrConfig,
    ServerConfig, TlsConfig,
};

/// Build a configuration from the environment with optional YAML overrides.
///
/// For every field: YAML value, then environment value, then default.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = EnvConfig::load();
    let yaml = yaml.unwrap_or_default();

    let server = yaml.server.unwrap_or_default();
    let acs = yaml.acs.unwrap_or_default();
    let ivr = yaml.ivr.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();

    let tls = merge_tls(server.tls.unwrap_or_default(), &env)?;

    let host = non_empty(server.host)
        .or(env.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match (server.port, env.port) {
        (Some(port), _) => port,
        (None, Some(raw)) => parse_port(env::PORT, &raw)?,
        (None, None) => DEFAULT_PORT,
    };

    let connection_string = non_empty(acs.connection_string)
        .or(env.acs_connection_string)
        .ok_or_else(|| {
            format!(
                "{} (or acs.connection_string in YAML) is required",
                env::ACS_CONNECTION_STRING
            )
        })?;

    let callback_uri = non_empty(acs.callback_uri)
        .or(env.public_callback_uri)
        .ok_or_else(|| {
            format!(
                "{} (or acs.callback_uri in YAML) is required",
                env::PUBLIC_CALLBACK_URI
            )
        })?;

    let api_version = non_empty(acs.api_version)
        .or(env.acs_api_version)
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    let ivr = IvrConfig {
        tts_voice: non_empty(ivr.tts_voice)
            .or(env.tts_voice)
            .unwrap_or_else(|| DEFAULT_TTS_VOICE.to_string()),
        speech_locale: non_empty(ivr.speech_locale)
            .or(env.speech_locale)
            .unwrap_or_else(|| DEFAULT_SPEECH_LOCALE.to_string()),
        sales_number: non_empty(ivr.sales_number).or(env.sales_number),
        support_number: non_empty(ivr.support_number).or(env.support_number),
    };

    let cors_allowed_origins =
        non_empty(security.cors_allowed_origins).or(env.cors_allowed_origins);

    Ok(ServerConfig {
        host,
        port,
        tls,
        acs: AcsConfig {
            connection_string,
            api_version,
            callback_uri,
        },
        ivr,
        cors_allowed_origins,
    })
}

fn merge_tls(tls: TlsYaml, env: &EnvConfig) -> Result<Option<TlsConfig>, String> {
    let enabled = match (tls.enabled, env.tls_enabled.as_deref()) {
        (Some(enabled), _) => enabled,
        (None, Some(raw)) => parse_bool(raw).ok_or_else(|| {
            format!("Invalid {} value '{raw}': expected true or false", env::TLS_ENABLED)
        })?,
        (None, None) => false,
    };

    if !enabled {
        return Ok(None);
    }

    let cert_path = non_empty(tls.cert_path)
        .or_else(|| env.tls_cert_path.clone())
        .ok_or_else(|| {
            format!(
                "TLS is enabled but {} (or server.tls.cert_path in YAML) is not set",
                env::TLS_CERT_PATH
            )
        })?;
    let key_path = non_empty(tls.key_path)
        .or_else(|| env.tls_key_path.clone())
        .ok_or_else(|| {
            format!(
                "TLS is enabled but {} (or server.tls.key_path in YAML) is not set",
                env::TLS_KEY_PATH
            )
        })?;

    Ok(Some(TlsConfig {
        cert_path: PathBuf::from(cert_path),
        key_path: PathBuf::from(key_path),
    }))
}

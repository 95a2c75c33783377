//! Configuration validation

use crate::acs::ConnectionString;
use crate::utils::{validate_callback_url, validate_phone_number};

use super::env;
use super::{ServerConfig, TlsConfig};

/// Validate a merged configuration, normalizing transfer numbers in place.
pub(super) fn validate_config(
    mut config: ServerConfig,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    validate_connection_string(&config.acs.connection_string)?;
    validate_callback_uri(&config.acs.callback_uri)?;

    config.ivr.sales_number =
        normalize_transfer_number(env::SALES_NUMBER, config.ivr.sales_number.take())?;
    config.ivr.support_number =
        normalize_transfer_number(env::SUPPORT_NUMBER, config.ivr.support_number.take())?;

    if let Some(tls) = &config.tls {
        validate_tls_files(tls)?;
    }

    Ok(config)
}

/// The connection string must parse into an endpoint and an access key.
pub(super) fn validate_connection_string(raw: &str) -> Result<(), String> {
    ConnectionString::parse(raw)
        .map(|_| ())
        .map_err(|e| format!("Invalid {}: {e}", env::ACS_CONNECTION_STRING))
}

/// The callback URI must be an absolute http(s) URL.
pub(super) fn validate_callback_uri(uri: &str) -> Result<(), String> {
    validate_callback_url(uri)
        .map(|_| ())
        .map_err(|e| format!("Invalid {} '{uri}': {e}", env::PUBLIC_CALLBACK_URI))
}

fn normalize_transfer_number(name: &str, number: Option<String>) -> Result<Option<String>, String> {
    number
        .map(|raw| validate_phone_number(&raw).map_err(|e| format!("Invalid {name}: {e}")))
        .transpose()
}

fn validate_tls_files(tls: &TlsConfig) -> Result<(), String> {
    for (what, path) in [("certificate", &tls.cert_path), ("key", &tls.key_path)] {
        if !path.is_file() {
            return Err(format!(
                "TLS {what} file not found: {}",
                path.display()
            ));
        }
    }
    Ok(())
}

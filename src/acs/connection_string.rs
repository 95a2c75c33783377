//! Parsing of `endpoint=...;accesskey=...` connection strings.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use url::Url;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::{AcsError, AcsResult};

/// Parsed Communication Services connection string.
///
/// The access key is kept decoded, ready to be used as the HMAC key, and is
/// wiped from memory when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ConnectionString {
    #[zeroize(skip)]
    endpoint: Url,
    access_key: Vec<u8>,
}

impl ConnectionString {
    /// Parse a connection string of the form
    /// `endpoint=https://<resource>.communication.azure.com/;accesskey=<base64>`.
    ///
    /// Keys are matched case-insensitively and may appear in any order.
    pub fn parse(raw: &str) -> AcsResult<Self> {
        let mut endpoint = None;
        let mut access_key = None;

        for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            // Split on the first '=' only, base64 padding uses '=' too
            let Some((key, value)) = part.split_once('=') else {
                return Err(AcsError::InvalidConnectionString(format!(
                    "segment without '=': {part}"
                )));
            };

            match key.trim().to_ascii_lowercase().as_str() {
                "endpoint" => endpoint = Some(value.trim().to_string()),
                "accesskey" => access_key = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let endpoint = endpoint
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AcsError::InvalidConnectionString("missing endpoint".to_string()))?;
        let mut access_key = access_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AcsError::InvalidConnectionString("missing accesskey".to_string()))?;

        let mut endpoint = Url::parse(&endpoint).map_err(|e| {
            AcsError::InvalidConnectionString(format!("endpoint is not a valid URL: {e}"))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(AcsError::InvalidConnectionString(format!(
                "endpoint must be an http(s) URL, got {endpoint}"
            )));
        }
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let decoded = STANDARD.decode(access_key.as_bytes()).map_err(|e| {
            AcsError::InvalidConnectionString(format!("accesskey is not valid base64: {e}"))
        });
        access_key.zeroize();

        Ok(Self {
            endpoint,
            access_key: decoded?,
        })
    }

    /// Resource endpoint, always ending with `/`.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn access_key(&self) -> &[u8] {
        &self.access_key
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionString")
            .field("endpoint", &self.endpoint.as_str())
            .field("access_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_connection_string() {
        let cs = ConnectionString::parse(
            "endpoint=https://contoso.communication.azure.com/;accesskey=c2VjcmV0",
        )
        .unwrap();

        assert_eq!(
            cs.endpoint().as_str(),
            "https://contoso.communication.azure.com/"
        );
        assert_eq!(cs.access_key(), b"secret");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_order_independent() {
        let cs = ConnectionString::parse(
            "AccessKey=c2VjcmV0; Endpoint=https://contoso.communication.azure.com",
        )
        .unwrap();

        // Trailing slash is added so relative joins keep the host path
        assert_eq!(
            cs.endpoint().as_str(),
            "https://contoso.communication.azure.com/"
        );
        assert_eq!(cs.access_key(), b"secret");
    }

    #[test]
    fn test_parse_keeps_base64_padding() {
        // "key" encodes to "a2V5" and "ke" to "a2U=" (padded)
        let cs =
            ConnectionString::parse("endpoint=https://x.example.com/;accesskey=a2U=").unwrap();
        assert_eq!(cs.access_key(), b"ke");
    }

    #[test]
    fn test_parse_missing_endpoint() {
        let err = ConnectionString::parse("accesskey=c2VjcmV0").unwrap_err();
        assert!(err.to_string().contains("missing endpoint"));
    }

    #[test]
    fn test_parse_missing_access_key() {
        let err = ConnectionString::parse("endpoint=https://x.example.com/").unwrap_err();
        assert!(err.to_string().contains("missing accesskey"));
    }

    #[test]
    fn test_parse_rejects_bad_base64() {
        let err =
            ConnectionString::parse("endpoint=https://x.example.com/;accesskey=***").unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn test_parse_rejects_non_http_endpoint() {
        let err = ConnectionString::parse("endpoint=ftp://x.example.com/;accesskey=c2VjcmV0")
            .unwrap_err();
        assert!(matches!(err, AcsError::InvalidConnectionString(_)));
    }

    #[test]
    fn test_debug_redacts_access_key() {
        let cs =
            ConnectionString::parse("endpoint=https://x.example.com/;accesskey=c2VjcmV0").unwrap();
        let printed = format!("{cs:?}");
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("secret"));
    }
}

//! HMAC-SHA256 request signing for Communication Services.
//!
//! Each request carries three headers:
//! - `x-ms-date`: RFC 1123 timestamp in GMT
//! - `x-ms-content-sha256`: base64 SHA-256 of the body
//! - `Authorization`: `HMAC-SHA256 SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature=<sig>`
//!
//! The signature is computed over
//! `"{METHOD}\n{path_and_query}\n{date};{host};{content_hash}"`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::macros::format_description;
use url::Url;

use super::error::{AcsError, AcsResult};

/// Headers produced by [`sign_request`].
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub date: String,
    pub content_hash: String,
    pub authorization: String,
}

/// Format a timestamp the way `x-ms-date` expects it.
pub fn format_http_date(now: OffsetDateTime) -> AcsResult<String> {
    now.to_offset(time::UtcOffset::UTC)
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .map_err(|e| AcsError::Signing(format!("failed to format date: {e}")))
}

/// Base64 encoded SHA-256 digest of the request body.
pub fn content_hash(body: &[u8]) -> String {
    STANDARD.encode(Sha256::digest(body))
}

/// Sign a request for the given URL and body.
pub fn sign_request(
    access_key: &[u8],
    method: &Method,
    url: &Url,
    body: &[u8],
    now: OffsetDateTime,
) -> AcsResult<SignedHeaders> {
    let date = format_http_date(now)?;
    let content_hash = content_hash(body);

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => return Err(AcsError::Signing(format!("URL has no host: {url}"))),
    };
    let path_and_query = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };

    let string_to_sign = format!(
        "{}\n{}\n{};{};{}",
        method.as_str(),
        path_and_query,
        date,
        host,
        content_hash
    );

    let mut mac = Hmac::<Sha256>::new_from_slice(access_key)
        .map_err(|e| AcsError::Signing(format!("invalid access key: {e}")))?;
    mac.update(string_to_sign.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    Ok(SignedHeaders {
        authorization: format!(
            "HMAC-SHA256 SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature={signature}"
        ),
        date,
        content_hash,
    })
}

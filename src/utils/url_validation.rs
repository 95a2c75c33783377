//! Callback URL validation
//!
//! The callback URL is handed to the call-control service when a call is
//! answered, and every in-call event is delivered to it. It must therefore be
//! an absolute http(s) URL that the service can reach from the internet.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during callback URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be http or https, got: {0}")]
    UnsupportedScheme(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Checks if an IPv4 address is not routable from the public internet
///
/// Covers loopback, RFC 1918 ranges, link-local, broadcast, unspecified,
/// documentation ranges, CGNAT (100.64.0.0/10) and benchmarking (198.18.0.0/15).
pub fn is_private_ipv4(ip: &Ipv4Addr) -> bool {
    let octets = ip.octets();
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_unspecified()
        || ip.is_documentation()
        || (octets[0] == 100 && (octets[1] & 0xC0) == 64)
        || (octets[0] == 198 && (octets[1] == 18 || octets[1] == 19))
}

/// Checks if an IPv6 address is not routable from the public internet
///
/// Covers loopback, unspecified, link-local (fe80::/10), unique local
/// (fc00::/7), documentation (2001:db8::/32) and IPv4-mapped private addresses.
pub fn is_private_ipv6(ip: &Ipv6Addr) -> bool {
    let segments = ip.segments();
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }
    if segments[0] & 0xFFC0 == 0xFE80 || segments[0] & 0xFE00 == 0xFC00 {
        return true;
    }
    if segments[0] == 0x2001 && segments[1] == 0x0DB8 {
        return true;
    }
    ip.to_ipv4_mapped().is_some_and(|v4| is_private_ipv4(&v4))
}

pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_private_ipv4(v4),
        IpAddr::V6(v6) => is_private_ipv6(v6),
    }
}

/// Validates the public callback URL
///
/// Hard requirements: parseable, http or https, has a host. Soft checks only
/// log a warning, since a tunnel or reverse proxy may make an otherwise
/// suspicious URL work:
/// - plain `http`
/// - `localhost` or a non-routable IP literal
///
/// Returns the parsed URL.
pub fn validate_callback_url(url: &str) -> Result<Url, UrlValidationError> {
    let parsed = Url::parse(url)?;

    let scheme = parsed.scheme();
    if scheme != "https" && scheme != "http" {
        return Err(UrlValidationError::UnsupportedScheme(scheme.to_string()));
    }

    let unreachable = match parsed.host() {
        Some(url::Host::Ipv4(ip)) => is_private_ipv4(&ip),
        Some(url::Host::Ipv6(ip)) => is_private_ipv6(&ip),
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        None => return Err(UrlValidationError::MissingHost),
    };

    if unreachable {
        warn!(
            url = %parsed,
            "Callback URL points at a local or private address; the call-control service will not be able to reach it"
        );
    }

    if scheme == "http" {
        warn!(url = %parsed, "Callback URL does not use https");
    }

    Ok(parsed)
}

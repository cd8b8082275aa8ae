//! URL host extraction.
//!
//! This is not a URL parser: it only locates the host of
//! `scheme://[userinfo@]host[:port][/path][?query][#fragment]` (or the
//! scheme-relative `//host...`). No percent-decoding is done.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractError, Result, UrlErrorKind};

/// RFC 3986 scheme followed by "://"
static SCHEME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("SCHEME_PATTERN: hardcoded regex is invalid")
});

/// Return the host candidate of `url`, unmodified.
pub fn extract_host(url: &str) -> Result<&str> {
    let rest = if let Some(rest) = url.strip_prefix("//") {
        rest
    } else if let Some(m) = SCHEME_PATTERN.find(url) {
        &url[m.end()..]
    } else {
        return Err(ExtractError::url(
            UrlErrorKind::MissingScheme,
            format!("url '{}' has no scheme", url),
        ));
    };

    // authority ends at the first path, query or fragment delimiter
    let authority = match rest.find(&['/', '?', '#'][..]) {
        Some(end) => &rest[..end],
        None => rest,
    };

    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    let host = strip_port(host_port);
    if host.is_empty() {
        return Err(ExtractError::url(
            UrlErrorKind::EmptyHost,
            format!("url '{}' does not contain a host", url),
        ));
    }
    Ok(host)
}

/// Strip a trailing ":digits" (or a bare ':'). Other colons stay in the host.
fn strip_port(host_port: &str) -> &str {
    match host_port.rfind(':') {
        Some(colon) if host_port[colon + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            &host_port[..colon]
        }
        _ => host_port,
    }
}

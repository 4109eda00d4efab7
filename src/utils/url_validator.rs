//! Target URL validation.
//!
//! Targets are stored exactly as submitted (minus surrounding whitespace);
//! validation only decides whether they are acceptable.

use axum::http::HeaderValue;
use url::Url;

/// Schemes that are never stored as redirect targets.
const BLOCKED_SCHEMES: &[&str] = &["javascript", "vbscript", "data", "file"];

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL contains control characters")]
    ControlCharacters,

    #[error("The '{0}' scheme is not allowed")]
    BlockedScheme(String),
}

/// Validates a candidate target URL.
///
/// # Rules
///
/// 1. No control characters inside the URL. The parser would silently drop
///    tabs and newlines, leaving a stored string that cannot be sent back
///    as a `Location` header
/// 2. Must parse as an absolute URL
/// 3. Scheme must not be one of `javascript`, `vbscript`, `data` or `file`
///
/// Returns the trimmed input on success.
///
/// # Errors
///
/// Returns [`UrlValidationError::ControlCharacters`] for embedded control characters.
/// Returns [`UrlValidationError::InvalidFormat`] for relative or malformed input.
/// Returns [`UrlValidationError::BlockedScheme`] for a blocked scheme.
pub fn validate_target(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if BLOCKED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlValidationError::BlockedScheme(url.scheme().to_string()));
    }

    Ok(trimmed)
}

/// Builds the `Location` header value for a stored target.
///
/// Non-ASCII targets (an IDN host or raw Unicode path) are sent in the
/// ASCII serialization produced by the URL parser. Returns `None` if the
/// target cannot be expressed as a header value at all.
pub fn location_header(target: &str) -> Option<HeaderValue> {
    if target.is_ascii() {
        return HeaderValue::from_str(target).ok();
    }

    let url = Url::parse(target).ok()?;
    HeaderValue::from_str(url.as_str()).ok()
}

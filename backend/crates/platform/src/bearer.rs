//! Bearer Token Extraction
//!
//! Parses `Authorization: Bearer <token>` (RFC 6750).

use axum::http::{HeaderMap, header};

const BEARER_SCHEME: &str = "bearer";

/// Extract the bearer credential from the `Authorization` header.
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is absent, not valid ASCII, uses another scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() { None } else { Some(token) }
}

/// `WWW-Authenticate` challenge sent with 401 responses.
pub fn challenge(error: &str) -> String {
    format!("Bearer error=\"{}\"", error)
}

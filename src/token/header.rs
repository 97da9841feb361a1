//! Credential extraction from request headers.

use axum::http::{HeaderMap, HeaderName};
use base64ct::{Base64, Base64Unpadded, Encoding};
use secrecy::SecretString;

/// Decode the token carried in `header`.
///
/// The value is standard base64, padded or not, optionally preceded by a
/// `Bearer` scheme.
/// Absent, non-ASCII, undecodable, non-UTF-8 or empty values all yield `None`.
pub(super) fn extract_token(headers: &HeaderMap, header: &HeaderName) -> Option<SecretString> {
    let value = headers.get(header)?.to_str().ok()?.trim();
    let encoded = strip_bearer(value).trim();
    if encoded.is_empty() {
        return None;
    }
    let bytes = Base64::decode_vec(encoded)
        .or_else(|_| Base64Unpadded::decode_vec(encoded))
        .ok()?;
    let token = String::from_utf8(bytes).ok()?;
    if token.is_empty() {
        return None;
    }
    Some(SecretString::from(token))
}

fn strip_bearer(value: &str) -> &str {
    match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest,
        _ => value,
    }
}

//! Key and code generation, and code comparison.

use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use subtle::ConstantTimeEq;
use ulid::Ulid;

use super::error::VerificationError;

const KEY_BYTES: usize = 32;

/// Unguessable lookup handle: 32 bytes from the OS RNG, base64url without padding.
pub(super) fn generate_verify_key() -> Result<String, VerificationError> {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| VerificationError::Random)?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Unique secondary code; only uniqueness is required of it.
pub(super) fn generate_verify_code() -> String {
    Ulid::new().to_string()
}

/// Exact byte comparison without early exit.
pub(super) fn codes_match(stored: &str, presented: &str) -> bool {
    stored.as_bytes().ct_eq(presented.as_bytes()).into()
}

//! # Verikey (verification codes & header token authentication)
//!
//! `verikey` issues expiring verification credentials for records and
//! authenticates API requests by an opaque token carried in a header.
//!
//! ## Verification
//!
//! [`verification::VerificationIssuer::generate`] writes a random key, a unique
//! code and the issuance time for a record. The key is the lookup handle that
//! travels in links; the code is compared exactly when the pair is presented
//! to [`verification::VerificationIssuer::verify`]. A pair stays valid until
//! `issued_at + expires_after` inclusive.
//!
//! Every failed verification (unknown key, wrong code, expired, unreadable
//! timestamp) looks the same to the caller.
//!
//! ## Token authentication
//!
//! [`token::TokenAuthenticator::authenticate`] reads the configured header,
//! base64-decodes it, and looks up the owning record by token. The password
//! column is always removed from the returned [`token::Identity`]. Missing or
//! malformed headers fall into the unauthenticated path, which surfaces as
//! `401 Unauthorized`.

pub mod api;
pub mod cli;
pub mod clock;
pub mod store;
pub mod token;
pub mod verification;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

//! Records exchanged between the issuer and the data-access layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Primary identifier of a verifiable record. Zero is treated as absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Returns the identifier when it can address a record.
    #[must_use]
    pub fn resolve(id: Option<Self>) -> Option<Self> {
        id.filter(|id| id.0 != 0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Issuance time as the store keeps it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredTimestamp {
    /// Seconds since the Unix epoch.
    Unix(i64),
    Text(String),
}

/// Snapshot written by `generate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssuedVerification {
    pub id: RecordId,
    pub key: String,
    pub code: String,
    pub issued_at: DateTime<Utc>,
    /// `issued_at` as wall time in the configured timezone, with its offset.
    #[serde(skip)]
    pub stamp: String,
}

/// Verification columns of a record located by key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationRecord {
    pub id: RecordId,
    pub code: String,
    pub timestamp: StoredTimestamp,
}

/// Public part of a record that passed verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VerifiedRecord {
    pub id: RecordId,
}

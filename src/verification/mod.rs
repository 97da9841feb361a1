//! Expiring verification credentials.
//!
//! Flow Overview: `generate` writes a fresh key, code and issuance stamp for a
//! record through the narrow store write; `verify` looks the record up by key,
//! compares the code exactly and checks the expiration window. The reason a
//! verification failed is only logged, never returned.

mod config;
mod error;
pub mod expiration;
mod types;
mod utils;

pub use config::{VerificationConfig, VerificationFields, DEFAULT_EXPIRES_AFTER_HOURS};
pub use error::VerificationError;
pub use types::{IssuedVerification, RecordId, StoredTimestamp, VerificationRecord, VerifiedRecord};

use chrono::SubsecRound;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::clock::{Clock, SystemClock};
use crate::store::VerificationStore;

use expiration::{format_timestamp, is_before_expiration, parse_timestamp};
use utils::{codes_match, generate_verify_code, generate_verify_key};

#[derive(Clone)]
pub struct VerificationIssuer<S> {
    store: S,
    clock: Arc<dyn Clock>,
    config: VerificationConfig,
}

impl<S: VerificationStore> VerificationIssuer<S> {
    #[must_use]
    pub fn new(store: S, config: VerificationConfig) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Issue a new key/code pair for `id` and persist it.
    ///
    /// # Errors
    ///
    /// `MissingIdentifier` when `id` is absent, zero, or matches no record;
    /// `Persistence` when the store write fails; `Random` when the OS RNG fails.
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        id: Option<RecordId>,
    ) -> Result<IssuedVerification, VerificationError> {
        let Some(id) = RecordId::resolve(id) else {
            return Err(VerificationError::MissingIdentifier);
        };

        // Stored text has second precision; keep the snapshot identical to it.
        let issued_at = self.clock.now().trunc_subsecs(0);
        let issued = IssuedVerification {
            id,
            key: generate_verify_key()?,
            code: generate_verify_code(),
            issued_at,
            stamp: format_timestamp(issued_at, self.config.timezone()),
        };

        match self.store.save_verification(&issued).await {
            Ok(true) => {
                debug!(%id, "verification issued");
                Ok(issued)
            }
            Ok(false) => {
                debug!(%id, "no record to attach verification to");
                Err(VerificationError::MissingIdentifier)
            }
            Err(err) => {
                error!("Failed to save verification for {id}: {err:#}");
                Err(VerificationError::Persistence(err))
            }
        }
    }

    /// Check a presented key/code pair.
    ///
    /// Returns `Ok(None)` for every kind of mismatch so callers cannot tell an
    /// unknown key from a wrong code or an expired pair.
    ///
    /// # Errors
    ///
    /// Only `Persistence`, when the lookup itself fails.
    #[instrument(skip_all)]
    pub async fn verify(
        &self,
        key: &str,
        code: &str,
    ) -> Result<Option<VerifiedRecord>, VerificationError> {
        match self.check(key, code).await {
            Ok(record) => Ok(Some(record)),
            Err(err @ VerificationError::Persistence(_)) => Err(err),
            Err(err) => {
                debug!("verification rejected: {err}");
                Ok(None)
            }
        }
    }

    /// Same as [`Self::verify`] but keeps the failure reason.
    pub(crate) async fn check(
        &self,
        key: &str,
        code: &str,
    ) -> Result<VerifiedRecord, VerificationError> {
        if key.is_empty() {
            return Err(VerificationError::NotFound);
        }

        let record = self
            .store
            .find_by_key(key)
            .await
            .map_err(|err| {
                error!("Failed to look up verification key: {err:#}");
                VerificationError::Persistence(err)
            })?
            .ok_or(VerificationError::NotFound)?;

        if code.is_empty() || !codes_match(&record.code, code) {
            return Err(VerificationError::CodeMismatch);
        }

        let issued_at = parse_timestamp(&record.timestamp, self.config.timezone())?;
        if !is_before_expiration(issued_at, self.config.expires_after_hours(), self.clock.now()) {
            return Err(VerificationError::Expired);
        }

        Ok(VerifiedRecord { id: record.id })
    }
}

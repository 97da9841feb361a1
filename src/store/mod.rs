//! Data-access layer behind the verification and token components.
//!
//! Each trait exposes only the narrow reads and writes the components need:
//! the verification write touches the key, code and timestamp columns and
//! nothing else, and the token read is a plain point lookup.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use anyhow::Result;
use secrecy::SecretString;
use serde_json::{Map, Value};
use std::future::Future;

use crate::verification::{IssuedVerification, VerificationRecord};

pub trait VerificationStore: Send + Sync {
    /// Write key, code and timestamp for `issued.id`.
    ///
    /// Resolves to `false` when no record has that identifier.
    fn save_verification(
        &self,
        issued: &IssuedVerification,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Find the record whose key equals `key` exactly.
    fn find_by_key(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<VerificationRecord>>> + Send;
}

pub trait IdentityStore: Send + Sync {
    /// All columns of the first record holding `token`.
    fn find_by_token(
        &self,
        token: &SecretString,
    ) -> impl Future<Output = Result<Option<Map<String, Value>>>> + Send;
}

pub trait HealthCheck: Send + Sync {
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Store selected at startup.
#[derive(Clone, Debug)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    #[must_use]
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgresql",
            Self::Memory(_) => "memory",
        }
    }
}

impl VerificationStore for Store {
    async fn save_verification(&self, issued: &IssuedVerification) -> Result<bool> {
        match self {
            Self::Postgres(store) => store.save_verification(issued).await,
            Self::Memory(store) => store.save_verification(issued).await,
        }
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<VerificationRecord>> {
        match self {
            Self::Postgres(store) => store.find_by_key(key).await,
            Self::Memory(store) => store.find_by_key(key).await,
        }
    }
}

impl IdentityStore for Store {
    async fn find_by_token(&self, token: &SecretString) -> Result<Option<Map<String, Value>>> {
        match self {
            Self::Postgres(store) => store.find_by_token(token).await,
            Self::Memory(store) => store.find_by_token(token).await,
        }
    }
}

impl HealthCheck for Store {
    async fn ping(&self) -> Result<()> {
        match self {
            Self::Postgres(store) => store.ping().await,
            Self::Memory(store) => store.ping().await,
        }
    }
}

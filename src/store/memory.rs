//! In-process store for development mode and tests.

use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{HealthCheck, IdentityStore, VerificationStore};
use crate::verification::{IssuedVerification, RecordId, StoredTimestamp, VerificationRecord};

const DEFAULT_TOKEN_FIELD: &str = "token";

#[derive(Debug, Default)]
struct Tables {
    records: BTreeMap<RecordId, MemoryRecord>,
    write_attempts: usize,
}

#[derive(Debug, Default)]
struct MemoryRecord {
    fields: Map<String, Value>,
    verification: Option<StoredVerification>,
}

#[derive(Debug)]
struct StoredVerification {
    key: String,
    code: String,
    timestamp: StoredTimestamp,
}

#[derive(Clone, Debug)]
pub struct MemoryStore {
    token_field: Arc<str>,
    tables: Arc<RwLock<Tables>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_FIELD)
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new(token_field: &str) -> Self {
        Self {
            token_field: Arc::from(token_field),
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    /// Insert or replace the columns of a record. Verification state is kept.
    pub async fn insert_record(&self, id: RecordId, fields: Map<String, Value>) {
        let mut tables = self.tables.write().await;
        tables.records.entry(id).or_default().fields = fields;
    }

    /// Seed verification state directly, bypassing `save_verification`.
    pub async fn set_verification(
        &self,
        id: RecordId,
        key: String,
        code: String,
        timestamp: StoredTimestamp,
    ) {
        let mut tables = self.tables.write().await;
        tables.records.entry(id).or_default().verification =
            Some(StoredVerification { key, code, timestamp });
    }

    /// Number of `save_verification` calls that reached the store.
    #[cfg(test)]
    pub(crate) async fn write_attempts(&self) -> usize {
        self.tables.read().await.write_attempts
    }
}

impl VerificationStore for MemoryStore {
    async fn save_verification(&self, issued: &IssuedVerification) -> Result<bool> {
        let mut tables = self.tables.write().await;
        tables.write_attempts += 1;
        let Some(record) = tables.records.get_mut(&issued.id) else {
            return Ok(false);
        };
        record.verification = Some(StoredVerification {
            key: issued.key.clone(),
            code: issued.code.clone(),
            timestamp: StoredTimestamp::Text(issued.stamp.clone()),
        });
        Ok(true)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<VerificationRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.records.iter().find_map(|(id, record)| {
            record
                .verification
                .as_ref()
                .filter(|verification| verification.key == key)
                .map(|verification| VerificationRecord {
                    id: *id,
                    code: verification.code.clone(),
                    timestamp: verification.timestamp.clone(),
                })
        }))
    }
}

impl IdentityStore for MemoryStore {
    async fn find_by_token(&self, token: &SecretString) -> Result<Option<Map<String, Value>>> {
        let tables = self.tables.read().await;
        let token = token.expose_secret();
        Ok(tables.records.iter().find_map(|(id, record)| {
            let matches = record
                .fields
                .get(self.token_field.as_ref())
                .and_then(Value::as_str)
                .is_some_and(|stored| stored == token);
            matches.then(|| {
                let mut fields = record.fields.clone();
                fields
                    .entry("id".to_string())
                    .or_insert_with(|| Value::from(id.0));
                fields
            })
        }))
    }
}

impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn issued(id: i64, key: &str) -> IssuedVerification {
        IssuedVerification {
            id: RecordId(id),
            key: key.to_string(),
            code: "code".to_string(),
            issued_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            stamp: "2024-01-01 00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn save_requires_existing_record() -> Result<()> {
        let store = MemoryStore::default();
        assert!(!store.save_verification(&issued(1, "k")).await?);
        assert_eq!(store.write_attempts().await, 1);

        store.insert_record(RecordId(1), Map::new()).await;
        assert!(store.save_verification(&issued(1, "k")).await?);

        let found = store.find_by_key("k").await?;
        assert_eq!(
            found,
            Some(VerificationRecord {
                id: RecordId(1),
                code: "code".to_string(),
                timestamp: StoredTimestamp::Text("2024-01-01 00:00:00+00:00".to_string()),
            })
        );
        assert_eq!(store.find_by_key("K").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn insert_record_keeps_verification_state() -> Result<()> {
        let store = MemoryStore::default();
        store.insert_record(RecordId(1), Map::new()).await;
        store.save_verification(&issued(1, "k")).await?;
        store
            .insert_record(RecordId(1), fields(json!({"name": "alice"})))
            .await;
        assert!(store.find_by_key("k").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn find_by_token_matches_configured_field() -> Result<()> {
        let store = MemoryStore::new("api_token");
        store
            .insert_record(
                RecordId(5),
                fields(json!({"api_token": "abc123", "password": "secret"})),
            )
            .await;

        let found = store
            .find_by_token(&SecretString::from("abc123".to_string()))
            .await?;
        assert_eq!(
            found.map(Value::Object),
            Some(json!({"id": 5, "api_token": "abc123", "password": "secret"}))
        );

        let missing = store
            .find_by_token(&SecretString::from("abc124".to_string()))
            .await?;
        assert!(missing.is_none());
        Ok(())
    }
}

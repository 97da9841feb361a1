//! PostgreSQL store.
//!
//! Table and column names come from configuration. They are validated and
//! quoted once in [`PgStore::new`]; the statements are built there and reused
//! for every call.

use anyhow::{bail, Context, Result};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use sqlx::{Connection, PgPool, Row};
use std::sync::Arc;
use tracing::{info_span, Instrument};

use super::{HealthCheck, IdentityStore, VerificationStore};
use crate::token::TokenConfig;
use crate::verification::{
    IssuedVerification, RecordId, StoredTimestamp, VerificationConfig, VerificationRecord,
};

#[derive(Debug)]
struct Statements {
    save_verification: String,
    find_by_key: String,
    find_by_token: String,
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
    statements: Arc<Statements>,
}

impl PgStore {
    /// Build the store and its statements.
    ///
    /// The verification timestamp column is expected to be `timestamptz` or
    /// `text`; the stamp carries its offset and is written as `timestamptz`.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured table or column name is not a plain
    /// SQL identifier.
    pub fn new(
        pool: PgPool,
        verification: &VerificationConfig,
        token: &TokenConfig,
    ) -> Result<Self> {
        let table = quote_table(verification.table())?;
        let pk = quote_column(verification.primary_key())?;
        let key = quote_column(&verification.fields().key)?;
        let code = quote_column(&verification.fields().code)?;
        let stamp = quote_column(&verification.fields().timestamp)?;
        let users = quote_table(token.user_model())?;
        let token_column = quote_column(token.token_field())?;

        let statements = Statements {
            save_verification: format!(
                "UPDATE {table} SET {key} = $2, {code} = $3, {stamp} = $4::timestamptz WHERE {pk} = $1"
            ),
            find_by_key: format!(
                "SELECT {pk}::bigint AS id, {code}::text AS code, {stamp}::text AS stamp \
                 FROM {table} WHERE {key} = $1 LIMIT 1"
            ),
            find_by_token: format!(
                "SELECT row_to_json(t)::text AS record FROM {users} AS t \
                 WHERE t.{token_column} = $1 LIMIT 1"
            ),
        };

        Ok(Self {
            pool,
            statements: Arc::new(statements),
        })
    }
}

impl VerificationStore for PgStore {
    async fn save_verification(&self, issued: &IssuedVerification) -> Result<bool> {
        let query = self.statements.save_verification.as_str();
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(issued.id.0)
            .bind(&issued.key)
            .bind(&issued.code)
            .bind(&issued.stamp)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to save verification data")?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<VerificationRecord>> {
        let query = self.statements.find_by_key.as_str();
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(key)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup verification key")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: i64 = row.try_get("id").context("invalid verification id")?;
        let code: Option<String> = row.try_get("code").context("invalid verification code")?;
        let stamp: Option<String> = row
            .try_get("stamp")
            .context("invalid verification timestamp")?;

        // A key without code or timestamp was never fully issued.
        Ok(code.zip(stamp).map(|(code, stamp)| VerificationRecord {
            id: RecordId(id),
            code,
            timestamp: StoredTimestamp::Text(stamp),
        }))
    }
}

impl IdentityStore for PgStore {
    async fn find_by_token(&self, token: &SecretString) -> Result<Option<Map<String, Value>>> {
        let query = self.statements.find_by_token.as_str();
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(token.expose_secret())
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to lookup token")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let record: String = row.try_get("record").context("invalid token record")?;
        let fields: Map<String, Value> =
            serde_json::from_str(&record).context("failed to decode token record")?;

        Ok(Some(fields))
    }
}

impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<()> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self
            .pool
            .acquire()
            .instrument(acquire_span)
            .await
            .context("failed to acquire database connection")?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping()
            .instrument(ping_span)
            .await
            .context("failed to ping database")
    }
}

fn identifier_regex() -> Result<Regex> {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").context("invalid identifier pattern")
}

/// Quote a column name, rejecting anything but a plain identifier.
fn quote_column(name: &str) -> Result<String> {
    if !identifier_regex()?.is_match(name) {
        bail!("invalid column name: {name:?}");
    }
    Ok(format!("\"{name}\""))
}

/// Quote a table name, optionally schema-qualified.
fn quote_table(name: &str) -> Result<String> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        bail!("invalid table name: {name:?}");
    }
    let quoted = parts
        .into_iter()
        .map(quote_column)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid table name: {name:?}"))?;
    Ok(quoted.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::VerificationFields;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn quote_column_accepts_plain_identifiers() {
        assert_eq!(quote_column("verify_key").ok(), Some("\"verify_key\"".to_string()));
        assert_eq!(quote_column("_col1").ok(), Some("\"_col1\"".to_string()));
    }

    #[test]
    fn quote_column_rejects_injection() {
        for name in ["", "1col", "a b", "a\"b", "x; DROP TABLE users", "a.b"] {
            assert!(quote_column(name).is_err(), "{name}");
        }
    }

    #[test]
    fn quote_table_allows_schema() {
        assert_eq!(
            quote_table("auth.users").ok(),
            Some("\"auth\".\"users\"".to_string())
        );
        assert!(quote_table("a.b.c").is_err());
        assert!(quote_table("auth.").is_err());
    }

    #[tokio::test]
    async fn statements_use_configured_names() -> Result<()> {
        let pool = PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/postgres")?;
        let verification = VerificationConfig::new()
            .with_table("accounts".to_string())
            .with_fields(VerificationFields {
                key: "vkey".to_string(),
                code: "vcode".to_string(),
                timestamp: "vtime".to_string(),
            });
        let token = TokenConfig::new()
            .with_user_model("api.members".to_string())
            .with_token_field("api_token".to_string());

        let store = PgStore::new(pool, &verification, &token)?;
        assert_eq!(
            store.statements.save_verification,
            "UPDATE \"accounts\" SET \"vkey\" = $2, \"vcode\" = $3, \"vtime\" = $4::timestamptz WHERE \"id\" = $1"
        );
        assert!(store
            .statements
            .find_by_key
            .ends_with("FROM \"accounts\" WHERE \"vkey\" = $1 LIMIT 1"));
        assert!(store
            .statements
            .find_by_token
            .contains("FROM \"api\".\"members\" AS t WHERE t.\"api_token\" = $1"));
        Ok(())
    }

    #[tokio::test]
    async fn new_rejects_bad_field_names() -> Result<()> {
        let pool = PgPoolOptions::new().connect_lazy("postgres://postgres@localhost/postgres")?;
        let verification = VerificationConfig::new().with_fields(VerificationFields {
            key: "key; --".to_string(),
            ..VerificationFields::default()
        });
        assert!(PgStore::new(pool, &verification, &TokenConfig::new()).is_err());
        Ok(())
    }
}

use crate::api::{self, AppState};
use crate::cli::actions::Action;
use crate::store::{MemoryStore, PgStore, Store};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};
use url::Url;

/// Handle the server action
/// # Errors
/// Returns an error if the DSN is invalid, the database is unreachable, the
/// configured column names are rejected, or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            verification,
            token,
        } => {
            let store = match dsn {
                Some(dsn) => {
                    let dsn = Url::parse(&dsn).context("Invalid database connection string")?;
                    info!(
                        "Connecting to database at {}",
                        dsn.host_str().unwrap_or("localhost")
                    );

                    let pool = PgPoolOptions::new()
                        .min_connections(1)
                        .max_connections(5)
                        .max_lifetime(Duration::from_secs(60 * 2))
                        .test_before_acquire(true)
                        .connect(dsn.as_str())
                        .await
                        .context("Failed to connect to database")?;

                    Store::Postgres(PgStore::new(pool, &verification, &token)?)
                }
                None => {
                    warn!("Using in-memory store, records are lost on exit");
                    Store::Memory(MemoryStore::new(token.token_field()))
                }
            };

            let state = Arc::new(AppState::new(store, verification, token));

            api::new(port, state).await?;
        }
    }

    Ok(())
}

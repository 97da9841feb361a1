//! Header token authentication.
//!
//! Flow Overview: read the configured header, base64-decode the token, look
//! the owning record up by token, and hand back its columns minus the
//! password. Anything short of a match ends in `401 Unauthorized`; a missing
//! identity is never treated as an anonymous caller.

mod config;
mod error;
mod header;
mod identity;

pub use config::TokenConfig;
pub use error::AuthError;
pub use identity::Identity;

use axum::http::HeaderMap;
use tracing::{debug, error, instrument};

use crate::store::IdentityStore;

use header::extract_token;

#[derive(Clone, Debug)]
pub struct TokenAuthenticator<S> {
    store: S,
    config: TokenConfig,
}

impl<S: IdentityStore> TokenAuthenticator<S> {
    #[must_use]
    pub fn new(store: S, config: TokenConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Resolve the request's token to a redacted identity.
    ///
    /// # Errors
    ///
    /// `MissingCredentials` when the header is absent or does not decode,
    /// `InvalidToken` when no record holds the token, `Store` when the lookup
    /// fails.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        let Some(token) = extract_token(headers, self.config.auth_header()) else {
            debug!(header = %self.config.auth_header(), "no usable credential in request");
            return Err(AuthError::MissingCredentials);
        };

        match self.store.find_by_token(&token).await {
            Ok(Some(fields)) => Ok(Identity::redacted(fields, self.config.password_field())),
            Ok(None) => {
                debug!("token did not match any record");
                Err(AuthError::InvalidToken)
            }
            Err(err) => {
                error!("Failed to lookup token: {err:#}");
                Err(AuthError::Store(err))
            }
        }
    }

    /// Failure signal for requests that did not authenticate.
    #[must_use]
    pub fn unauthenticated(&self) -> AuthError {
        AuthError::Unauthorized
    }

    /// `authenticate`, with every credential failure routed through
    /// [`Self::unauthenticated`]. Store failures keep their own error.
    ///
    /// # Errors
    ///
    /// `Unauthorized` or `Store`.
    pub async fn require(&self, headers: &HeaderMap) -> Result<Identity, AuthError> {
        match self.authenticate(headers).await {
            Ok(identity) => Ok(identity),
            Err(err @ AuthError::Store(_)) => Err(err),
            Err(_) => Err(self.unauthenticated()),
        }
    }
}

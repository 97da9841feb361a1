use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("missing or malformed credentials")]
    MissingCredentials,
    #[error("unknown token")]
    InvalidToken,
    #[error("token lookup failed")]
    Store(#[source] anyhow::Error),
}

impl AuthError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized | Self::MissingCredentials | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self.status() {
            StatusCode::UNAUTHORIZED => (
                StatusCode::UNAUTHORIZED,
                [(WWW_AUTHENTICATE, "Bearer")],
                "Unauthorized".to_string(),
            )
                .into_response(),
            status => (status, "Authentication failed".to_string()).into_response(),
        }
    }
}

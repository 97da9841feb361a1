use axum::http::{header::AUTHORIZATION, header::InvalidHeaderName, HeaderName};

const DEFAULT_USER_MODEL: &str = "users";
const DEFAULT_PASSWORD_FIELD: &str = "password";
const DEFAULT_TOKEN_FIELD: &str = "token";

#[derive(Clone, Debug)]
pub struct TokenConfig {
    user_model: String,
    password_field: String,
    token_field: String,
    auth_header: HeaderName,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_model: DEFAULT_USER_MODEL.to_string(),
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
            token_field: DEFAULT_TOKEN_FIELD.to_string(),
            auth_header: AUTHORIZATION,
        }
    }

    #[must_use]
    pub fn with_user_model(mut self, user_model: String) -> Self {
        self.user_model = user_model;
        self
    }

    #[must_use]
    pub fn with_password_field(mut self, password_field: String) -> Self {
        self.password_field = password_field;
        self
    }

    #[must_use]
    pub fn with_token_field(mut self, token_field: String) -> Self {
        self.token_field = token_field;
        self
    }

    /// Header carrying the credential. Names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid HTTP header name.
    pub fn with_auth_header(mut self, name: &str) -> Result<Self, InvalidHeaderName> {
        self.auth_header = HeaderName::from_bytes(name.as_bytes())?;
        Ok(self)
    }

    #[must_use]
    pub fn user_model(&self) -> &str {
        &self.user_model
    }

    #[must_use]
    pub fn password_field(&self) -> &str {
        &self.password_field
    }

    #[must_use]
    pub fn token_field(&self) -> &str {
        &self.token_field
    }

    #[must_use]
    pub fn auth_header(&self) -> &HeaderName {
        &self.auth_header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TokenConfig::new();
        assert_eq!(config.user_model(), "users");
        assert_eq!(config.password_field(), "password");
        assert_eq!(config.token_field(), "token");
        assert_eq!(config.auth_header(), &AUTHORIZATION);
    }

    #[test]
    fn auth_header_is_normalized() {
        let config = TokenConfig::new().with_auth_header("X-Api-Token").ok();
        assert_eq!(
            config.map(|c| c.auth_header().as_str().to_string()),
            Some("x-api-token".to_string())
        );
    }

    #[test]
    fn auth_header_rejects_invalid_names() {
        assert!(TokenConfig::new().with_auth_header("bad header").is_err());
        assert!(TokenConfig::new().with_auth_header("").is_err());
    }
}

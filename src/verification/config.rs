//! Verification settings, fixed at construction.

use chrono_tz::Tz;

pub const DEFAULT_EXPIRES_AFTER_HOURS: u32 = 48;
const DEFAULT_TABLE: &str = "users";
const DEFAULT_PRIMARY_KEY: &str = "id";

/// Column names holding the verification state of a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationFields {
    pub key: String,
    pub code: String,
    pub timestamp: String,
}

impl Default for VerificationFields {
    fn default() -> Self {
        Self {
            key: "verify_key".to_string(),
            code: "verify_code".to_string(),
            timestamp: "verify_time".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct VerificationConfig {
    expires_after_hours: u32,
    fields: VerificationFields,
    table: String,
    primary_key: String,
    timezone: Tz,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl VerificationConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expires_after_hours: DEFAULT_EXPIRES_AFTER_HOURS,
            fields: VerificationFields::default(),
            table: DEFAULT_TABLE.to_string(),
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            timezone: Tz::UTC,
        }
    }

    #[must_use]
    pub fn with_expires_after_hours(mut self, hours: u32) -> Self {
        self.expires_after_hours = hours;
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: VerificationFields) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: String) -> Self {
        self.table = table;
        self
    }

    #[must_use]
    pub fn with_primary_key(mut self, primary_key: String) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Timezone used to write and read offset-less textual timestamps.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn expires_after_hours(&self) -> u32 {
        self.expires_after_hours
    }

    #[must_use]
    pub fn fields(&self) -> &VerificationFields {
        &self.fields
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = VerificationConfig::new();
        assert_eq!(config.expires_after_hours(), 48);
        assert_eq!(config.fields().key, "verify_key");
        assert_eq!(config.fields().code, "verify_code");
        assert_eq!(config.fields().timestamp, "verify_time");
        assert_eq!(config.table(), "users");
        assert_eq!(config.primary_key(), "id");
        assert_eq!(config.timezone(), Tz::UTC);
    }

    #[test]
    fn builders_override_defaults() {
        let config = VerificationConfig::new()
            .with_expires_after_hours(2)
            .with_table("accounts".to_string())
            .with_timezone(Tz::Europe__Madrid)
            .with_fields(VerificationFields {
                key: "k".to_string(),
                code: "c".to_string(),
                timestamp: "t".to_string(),
            });
        assert_eq!(config.expires_after_hours(), 2);
        assert_eq!(config.table(), "accounts");
        assert_eq!(config.timezone(), Tz::Europe__Madrid);
        assert_eq!(config.fields().timestamp, "t");
    }
}

use serde::Serialize;
use serde_json::{Map, Value};

/// Record columns of an authenticated caller, password column removed.
///
/// The only constructor strips the password, so an `Identity` never carries one.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Identity(Map<String, Value>);

impl Identity {
    pub(super) fn redacted(mut fields: Map<String, Value>, password_field: &str) -> Self {
        fields.remove(password_field);
        Self(fields)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.get("id")
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

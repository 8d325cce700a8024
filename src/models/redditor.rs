//! Author reference.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::transport::Fields;

use super::Kind;

/// Handle to a user account.
///
/// Built either from a bare name or from a partial user record; in the
/// latter case the record's fields are kept so callers can read them
/// without another request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redditor {
    name: String,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    data: Fields,
}

impl Redditor {
    /// Placeholder name the API uses for removed accounts.
    pub const DELETED: &'static str = "[deleted]";

    /// Creates a reference from a bare name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Fields::new(),
        }
    }

    /// Builds a reference from a raw attribute value.
    ///
    /// Accepts a name string or a record carrying `name`. Returns
    /// `Ok(None)` for null and deleted accounts, and gives the value back
    /// unchanged when it has neither shape.
    pub fn from_value(value: JsonValue) -> Result<Option<Self>, JsonValue> {
        match value {
            JsonValue::Null => Ok(None),
            JsonValue::String(name) if name == Self::DELETED => Ok(None),
            JsonValue::String(name) => Ok(Some(Self::new(name))),
            JsonValue::Object(data) => match data.get("name").and_then(JsonValue::as_str) {
                Some(Self::DELETED) => Ok(None),
                Some(name) => Ok(Some(Self {
                    name: name.to_string(),
                    data,
                })),
                None => Err(JsonValue::Object(data)),
            },
            other => Err(other),
        }
    }

    /// Returns the account name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fullname when the record carried an id.
    pub fn fullname(&self) -> Option<String> {
        self.data
            .get("id")
            .and_then(JsonValue::as_str)
            .map(|id| Kind::Redditor.fullname(id))
    }

    /// Returns a field of the partial record, if present.
    pub fn get_raw(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }
}

impl PartialEq for Redditor {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Redditor {}

impl std::fmt::Display for Redditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

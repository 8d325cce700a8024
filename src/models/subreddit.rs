//! Container reference.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::transport::Fields;

/// Handle to the subreddit a submission was posted in, keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subreddit {
    display_name: String,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    data: Fields,
}

impl Subreddit {
    /// Creates a reference from a display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            data: Fields::new(),
        }
    }

    /// Builds a reference from a raw attribute value.
    ///
    /// Accepts a name string or a record carrying `display_name`; any
    /// other value is given back unchanged.
    pub fn from_value(value: JsonValue) -> Result<Self, JsonValue> {
        match value {
            JsonValue::String(name) if !name.is_empty() => Ok(Self::new(name)),
            JsonValue::Object(data) => {
                match data.get("display_name").and_then(JsonValue::as_str) {
                    Some(name) => Ok(Self {
                        display_name: name.to_string(),
                        data,
                    }),
                    None => Err(JsonValue::Object(data)),
                }
            }
            other => Err(other),
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the path prefix of this subreddit (`r/<name>`).
    pub fn path(&self) -> String {
        format!("r/{}", self.display_name)
    }

    /// Returns a field of the partial record, if present.
    pub fn get_raw(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }
}

impl PartialEq for Subreddit {
    fn eq(&self, other: &Self) -> bool {
        self.display_name.eq_ignore_ascii_case(&other.display_name)
    }
}

impl Eq for Subreddit {}

impl std::fmt::Display for Subreddit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_name() {
        let subreddit = Subreddit::from_value(json!("redditdev")).unwrap();
        assert_eq!(subreddit.display_name(), "redditdev");
        assert_eq!(subreddit.path(), "r/redditdev");
    }

    #[test]
    fn test_from_record() {
        let subreddit =
            Subreddit::from_value(json!({"display_name": "redditdev", "subscribers": 10}))
                .unwrap();
        assert_eq!(subreddit.to_string(), "redditdev");
        assert_eq!(subreddit.get_raw("subscribers"), Some(&json!(10)));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(Subreddit::from_value(json!("")).is_err());
        assert!(Subreddit::from_value(json!(null)).is_err());
    }
}

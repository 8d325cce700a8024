//! Attribute values stored on a submission.

use serde_json::Value as JsonValue;

use super::{CommentForest, Redditor, Subreddit};

/// Value of a single submission attribute.
///
/// Most fields stay raw JSON. The fields listed in the interceptor's table
/// hold typed references, and `comments` holds the shared forest.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Raw(JsonValue),
    Author(Redditor),
    Subreddit(Subreddit),
    Comments(CommentForest),
}

impl AttrValue {
    /// Returns the raw JSON value, if this is not a typed reference.
    pub fn as_raw(&self) -> Option<&JsonValue> {
        match self {
            AttrValue::Raw(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_raw().and_then(JsonValue::as_str)
    }

    pub fn as_author(&self) -> Option<&Redditor> {
        match self {
            AttrValue::Author(redditor) => Some(redditor),
            _ => None,
        }
    }

    pub fn as_subreddit(&self) -> Option<&Subreddit> {
        match self {
            AttrValue::Subreddit(subreddit) => Some(subreddit),
            _ => None,
        }
    }

    pub fn as_comments(&self) -> Option<&CommentForest> {
        match self {
            AttrValue::Comments(forest) => Some(forest),
            _ => None,
        }
    }

    /// Renders the value as JSON. References collapse to their names.
    pub fn to_json(&self) -> JsonValue {
        match self {
            AttrValue::Raw(value) => value.clone(),
            AttrValue::Author(redditor) => JsonValue::String(redditor.name().to_string()),
            AttrValue::Subreddit(subreddit) => {
                JsonValue::String(subreddit.display_name().to_string())
            }
            AttrValue::Comments(forest) => forest.to_json(),
        }
    }
}

impl From<JsonValue> for AttrValue {
    fn from(value: JsonValue) -> Self {
        AttrValue::Raw(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Raw(JsonValue::String(value.to_string()))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Raw(JsonValue::String(value))
    }
}

impl From<Redditor> for AttrValue {
    fn from(value: Redditor) -> Self {
        AttrValue::Author(value)
    }
}

impl From<Subreddit> for AttrValue {
    fn from(value: Subreddit) -> Self {
        AttrValue::Subreddit(value)
    }
}

impl From<CommentForest> for AttrValue {
    fn from(value: CommentForest) -> Self {
        AttrValue::Comments(value)
    }
}

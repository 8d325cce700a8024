//! Comment records held by a [`CommentForest`](super::CommentForest).

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::transport::{Fields, Listing, Thing};

use super::kind::split_fullname;
use super::{Kind, Redditor};

/// A single comment.
///
/// Replies are not stored on the comment itself; the forest indexes them
/// by parent id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    id: String,
    parent_id: String,
    data: Fields,
}

impl Comment {
    /// Creates a comment from its id, parent fullname and raw fields.
    pub fn new(id: impl Into<String>, parent_id: impl Into<String>, data: Fields) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            data,
        }
    }

    /// Decodes a `t1` thing, returning the comment and its nested replies.
    pub(crate) fn from_thing(path: &str, thing: Thing) -> Result<(Self, Listing), AppError> {
        let mut data = thing.into_data();
        let replies = match data.remove("replies") {
            Some(value) => Listing::from_nested(path, value)?,
            None => Listing::default(),
        };

        let id = required_str(path, &data, "id")?;
        let parent_id = required_str(path, &data, "parent_id")?;
        Ok((Self::new(id, parent_id, data), replies))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fullname(&self) -> String {
        Kind::Comment.fullname(&self.id)
    }

    /// Fullname of the parent: a comment (`t1_`) or the submission (`t3_`).
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    /// Short id of the parent comment, or `None` for top-level comments.
    pub fn parent_comment_id(&self) -> Option<&str> {
        match split_fullname(&self.parent_id) {
            Some((Kind::Comment, id)) => Some(id),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.data.get("body").and_then(JsonValue::as_str)
    }

    pub fn score(&self) -> Option<i64> {
        self.data.get("score").and_then(JsonValue::as_i64)
    }

    /// Author of the comment; `None` when deleted or absent.
    pub fn author(&self) -> Option<Redditor> {
        self.data
            .get("author")
            .cloned()
            .and_then(|value| Redditor::from_value(value).ok().flatten())
    }

    /// Creation time, from `created_utc`.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        let secs = self.data.get("created_utc").and_then(JsonValue::as_f64)?;
        DateTime::from_timestamp(secs as i64, 0)
    }

    /// Returns a raw field, if present.
    pub fn get_raw(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    pub fn data(&self) -> &Fields {
        &self.data
    }
}

/// Placeholder for comments the API did not include in a reply.
///
/// Expanding placeholders is the caller's concern; the forest only keeps
/// them so nothing the server announced is lost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoreComments {
    pub id: String,
    pub parent_id: String,
    /// Number of comments behind this placeholder.
    pub count: u64,
    /// Ids of the omitted comments.
    pub children: Vec<String>,
}

impl MoreComments {
    /// Kind tag carried by placeholder things.
    pub const KIND: &'static str = "more";

    pub(crate) fn from_thing(path: &str, thing: Thing) -> Result<Self, AppError> {
        let data = thing.into_data();
        let children = data
            .get("children")
            .and_then(JsonValue::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id: required_str(path, &data, "id")?,
            parent_id: required_str(path, &data, "parent_id")?,
            count: data.get("count").and_then(JsonValue::as_u64).unwrap_or(0),
            children,
        })
    }
}

fn required_str(path: &str, data: &Fields, key: &str) -> Result<String, AppError> {
    data.get(key)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::malformed(path, format!("comment record without '{}'", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn thing(value: JsonValue) -> Thing {
        Thing::from_value("p", value).unwrap()
    }

    #[test]
    fn test_from_thing_splits_replies() {
        let (comment, replies) = Comment::from_thing(
            "p",
            thing(json!({"kind": "t1", "data": {
                "id": "c1",
                "parent_id": "t3_abc",
                "body": "hello",
                "author": "bboe",
                "score": 3,
                "created_utc": 1410000000.0,
                "replies": {"kind": "Listing", "data": {"children": [
                    {"kind": "t1", "data": {"id": "c2", "parent_id": "t1_c1"}}
                ]}}
            }})),
        )
        .unwrap();

        assert_eq!(comment.id(), "c1");
        assert_eq!(comment.fullname(), "t1_c1");
        assert_eq!(comment.body(), Some("hello"));
        assert_eq!(comment.score(), Some(3));
        assert_eq!(comment.author().unwrap().name(), "bboe");
        assert_eq!(comment.created().unwrap().timestamp(), 1410000000);
        assert!(comment.parent_comment_id().is_none());
        assert!(comment.get_raw("replies").is_none());
        assert_eq!(replies.children.len(), 1);
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = Comment::from_thing(
            "p",
            thing(json!({"kind": "t1", "data": {"parent_id": "t3_abc"}})),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::MalformedReply { .. }));
    }

    #[test]
    fn test_more_comments() {
        let more = MoreComments::from_thing(
            "p",
            thing(json!({"kind": "more", "data": {
                "id": "m1", "parent_id": "t1_c1", "count": 2, "children": ["c8", "c9"]
            }})),
        )
        .unwrap();
        assert_eq!(more.count, 2);
        assert_eq!(more.children, vec!["c8", "c9"]);
    }
}

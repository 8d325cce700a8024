//! Request parameters and the reply shapes returned by the API.
//!
//! Every object the API returns is a [`Thing`]: `{"kind": ..., "data": {...}}`.
//! Collections arrive as a `Listing` thing whose `data.children` holds more
//! things.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::AppError;

/// Parameters for requests.
///
/// Query-string parameters for reads and form fields for writes. Values
/// are expected to be primitives (strings, numbers, booleans).
pub type Params = HashMap<String, JsonValue>;

/// Raw field map of a thing.
pub type Fields = Map<String, JsonValue>;

/// A single typed record from a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    /// Kind tag: `t1` comment, `t3` submission, `more`, `Listing`, ...
    pub kind: String,
    /// Raw fields.
    #[serde(default)]
    pub data: Fields,
}

impl Thing {
    /// Creates a thing from its kind and fields.
    pub fn new(kind: impl Into<String>, data: Fields) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    /// Decodes a thing from a JSON value.
    pub fn from_value(path: &str, value: JsonValue) -> Result<Self, AppError> {
        serde_json::from_value(value)
            .map_err(|e| AppError::malformed(path, format!("expected a thing: {}", e)))
    }

    /// Returns the raw JSON value for a field, if present.
    pub fn get_raw(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// Returns a string field, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(JsonValue::as_str)
    }

    /// Consumes the thing and returns its fields.
    pub fn into_data(self) -> Fields {
        self.data
    }
}

/// A page of things.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub children: Vec<Thing>,
    /// Cursor for the next page, if any.
    pub after: Option<String>,
    /// Cursor for the previous page, if any.
    pub before: Option<String>,
}

impl Listing {
    /// Kind tag carried by listing things.
    pub const KIND: &'static str = "Listing";

    /// Decodes a listing from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedReply`] if the value is not a thing of
    /// kind `Listing` or its children are not things.
    pub fn from_value(path: &str, value: JsonValue) -> Result<Self, AppError> {
        let thing = Thing::from_value(path, value)?;
        if thing.kind != Self::KIND {
            return Err(AppError::malformed(
                path,
                format!("expected a Listing, got kind '{}'", thing.kind),
            ));
        }

        let mut data = thing.data;
        let children = match data.remove("children") {
            Some(JsonValue::Array(items)) => items
                .into_iter()
                .map(|item| Thing::from_value(path, item))
                .collect::<Result<Vec<_>, _>>()?,
            Some(JsonValue::Null) | None => Vec::new(),
            Some(other) => {
                return Err(AppError::malformed(
                    path,
                    format!("Listing children is not an array: {}", other),
                ))
            }
        };

        Ok(Self {
            children,
            after: take_cursor(&mut data, "after"),
            before: take_cursor(&mut data, "before"),
        })
    }

    /// Decodes an optional nested listing (a comment's `replies` field).
    ///
    /// The API sends an empty string when there are no replies.
    pub fn from_nested(path: &str, value: JsonValue) -> Result<Self, AppError> {
        match value {
            JsonValue::Null => Ok(Self::default()),
            JsonValue::String(s) if s.is_empty() => Ok(Self::default()),
            other => Self::from_value(path, other),
        }
    }

    /// Consumes the listing and returns its only child.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedReply`] unless the listing holds exactly
    /// one child.
    pub fn into_single(self, path: &str) -> Result<Thing, AppError> {
        let count = self.children.len();
        let mut children = self.children.into_iter();
        match (children.next(), count) {
            (Some(thing), 1) => Ok(thing),
            _ => Err(AppError::malformed(
                path,
                format!("expected exactly one record, got {}", count),
            )),
        }
    }
}

fn take_cursor(data: &mut Fields, key: &str) -> Option<String> {
    match data.remove(key) {
        Some(JsonValue::String(s)) => Some(s),
        _ => None,
    }
}

/// Splits a two-part reply into `(primary, secondary)` listings.
///
/// # Errors
///
/// Returns [`AppError::MalformedReply`] unless the reply is an array of
/// exactly two listings.
pub fn split_listings(path: &str, value: JsonValue) -> Result<(Listing, Listing), AppError> {
    let items = match value {
        JsonValue::Array(items) => items,
        other => {
            return Err(AppError::malformed(
                path,
                format!("expected a two-part array, got {}", type_name(&other)),
            ))
        }
    };
    if items.len() != 2 {
        return Err(AppError::malformed(
            path,
            format!("expected a two-part array, got {} parts", items.len()),
        ));
    }

    let mut items = items.into_iter();
    let primary = items.next().unwrap_or_default();
    let secondary = items.next().unwrap_or_default();
    Ok((
        Listing::from_value(path, primary)?,
        Listing::from_value(path, secondary)?,
    ))
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Renders a primitive parameter value for a query string or form body.
pub fn param_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

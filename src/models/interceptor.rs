//! Conversion of raw attribute values into typed references.
//!
//! Every write to a submission attribute passes through [`intercept`], so
//! fields listed in [`TYPED_FIELDS`] are typed no matter whether they came
//! from construction data, a caller, or a fetch.

use serde_json::Value as JsonValue;

use super::{AttrValue, Redditor, Subreddit};

/// Reference types an attribute can be promoted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedField {
    Author,
    Subreddit,
}

/// Attribute names whose values are promoted to typed references.
pub const TYPED_FIELDS: &[(&str, TypedField)] = &[
    ("author", TypedField::Author),
    ("subreddit", TypedField::Subreddit),
];

/// Looks up the typed field registered for `name`.
pub fn typed_field(name: &str) -> Option<TypedField> {
    TYPED_FIELDS
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, typed)| *typed)
}

/// Returns the value to store for attribute `name`.
///
/// Raw values of typed fields are converted; values that are already typed,
/// and values of any other attribute, are returned unchanged. A raw value
/// with an unrecognised shape is stored as-is.
pub fn intercept(name: &str, value: AttrValue) -> AttrValue {
    let Some(field) = typed_field(name) else {
        return value;
    };
    let AttrValue::Raw(raw) = value else {
        return value;
    };

    match field {
        TypedField::Author => match Redditor::from_value(raw) {
            Ok(Some(redditor)) => AttrValue::Author(redditor),
            Ok(None) => AttrValue::Raw(JsonValue::Null),
            Err(raw) => unconverted(name, raw),
        },
        TypedField::Subreddit => match Subreddit::from_value(raw) {
            Ok(subreddit) => AttrValue::Subreddit(subreddit),
            Err(raw) => unconverted(name, raw),
        },
    }
}

fn unconverted(name: &str, raw: JsonValue) -> AttrValue {
    if !raw.is_null() {
        tracing::warn!(attribute = name, value = %raw, "Storing unrecognised reference shape as raw");
    }
    AttrValue::Raw(raw)
}

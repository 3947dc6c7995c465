//! Declarative reshaping of upstream JSON into caller-facing records.
//!
//! Upstream payloads are loosely shaped: the same concept may arrive under
//! different keys (`title` or `name`, `author` or `creator`). Each output field
//! is described once by a [`FieldRule`] listing its source keys and how to
//! resolve them, and [`reshape`] applies a table of rules uniformly.

use serde_json::{Map, Value};
use thiserror::Error;

/// A caller-facing output record.
pub type Record = Map<String, Value>;

/// Upstream JSON did not have the shape a tool relies on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReshapeError {
    /// Response body was not a JSON object.
    #[error("expected a JSON object response, got {0}")]
    NotAnObject(&'static str),

    /// `results` was present but not an array.
    #[error("expected 'results' to be an array, got {0}")]
    ResultsNotArray(&'static str),

    /// An entry in `results` was not an object.
    #[error("expected result entry {index} to be an object, got {kind}")]
    EntryNotObject {
        /// Position within `results`
        index: usize,
        /// JSON type found instead
        kind: &'static str,
    },

    /// A text field held a non-string value.
    #[error("expected '{field}' to be a string, got {kind}")]
    NotText {
        /// Source key
        field: &'static str,
        /// JSON type found instead
        kind: &'static str,
    },
}

/// Value used when an `Or` rule's source key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// `[]`
    EmptyList,
    /// `{}`
    EmptyObject,
}

impl Fallback {
    fn value(self) -> Value {
        match self {
            Self::EmptyList => Value::Array(Vec::new()),
            Self::EmptyObject => Value::Object(Map::new()),
        }
    }
}

/// How a field's source keys are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// First truthy source value; otherwise the last source's value, else null.
    Coalesce,
    /// The source value, or the fallback when the key is absent.
    Or(Fallback),
    /// The source string trimmed; absent or null becomes `""`.
    TrimmedText,
}

/// One canonical output field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Output key
    pub field: &'static str,
    /// Upstream keys, in priority order
    pub sources: &'static [&'static str],
    /// Resolution strategy
    pub rule: Rule,
}

impl FieldRule {
    const fn coalesce(field: &'static str, sources: &'static [&'static str]) -> Self {
        Self {
            field,
            sources,
            rule: Rule::Coalesce,
        }
    }

    const fn or(field: &'static str, sources: &'static [&'static str], fallback: Fallback) -> Self {
        Self {
            field,
            sources,
            rule: Rule::Or(fallback),
        }
    }

    const fn text(field: &'static str, sources: &'static [&'static str]) -> Self {
        Self {
            field,
            sources,
            rule: Rule::TrimmedText,
        }
    }

    fn resolve(&self, entry: &Map<String, Value>) -> Result<Value, ReshapeError> {
        match self.rule {
            Rule::Coalesce => Ok(coalesce(entry, self.sources)),
            Rule::Or(fallback) => Ok(first_present(entry, self.sources)
                .cloned()
                .unwrap_or_else(|| fallback.value())),
            Rule::TrimmedText => match first_present(entry, self.sources) {
                None | Some(Value::Null) => Ok(Value::String(String::new())),
                Some(Value::String(s)) => Ok(Value::String(s.trim().to_string())),
                Some(other) => Err(ReshapeError::NotText {
                    field: self.field,
                    kind: kind(other),
                }),
            },
        }
    }
}

/// Search results and other item listings.
pub const ITEM_SUMMARY: &[FieldRule] = &[
    FieldRule::coalesce("id", &["id"]),
    FieldRule::coalesce("title", &["title", "name"]),
    FieldRule::text("description", &["description"]),
    FieldRule::coalesce("url", &["url"]),
    FieldRule::or("tags", &["tags"], Fallback::EmptyList),
];

/// Popular items: the summary fields plus a popularity score.
pub const POPULAR_ITEM: &[FieldRule] = &[
    FieldRule::coalesce("id", &["id"]),
    FieldRule::coalesce("title", &["title", "name"]),
    FieldRule::text("description", &["description"]),
    FieldRule::coalesce("url", &["url"]),
    FieldRule::or("tags", &["tags"], Fallback::EmptyList),
    FieldRule::coalesce("popularity_score", &["score", "rating"]),
];

/// Full item details.
pub const ITEM_DETAILS: &[FieldRule] = &[
    FieldRule::coalesce("id", &["id"]),
    FieldRule::coalesce("title", &["title", "name"]),
    FieldRule::text("description", &["description"]),
    FieldRule::text("full_description", &["full_description"]),
    FieldRule::coalesce("url", &["url"]),
    FieldRule::coalesce("created_date", &["created_at", "date"]),
    FieldRule::coalesce("author", &["author", "creator"]),
    FieldRule::or("tags", &["tags"], Fallback::EmptyList),
    FieldRule::coalesce("category", &["category"]),
    FieldRule::or("metadata", &["metadata"], Fallback::EmptyObject),
];

/// Category listings.
pub const CATEGORY: &[FieldRule] = &[
    FieldRule::coalesce("id", &["id"]),
    FieldRule::coalesce("name", &["name"]),
    FieldRule::coalesce("description", &["description"]),
    FieldRule::coalesce("item_count", &["count", "items"]),
    FieldRule::coalesce("icon", &["icon"]),
];

/// Applies `rules` to one upstream object, producing fields in table order.
pub fn reshape(entry: &Map<String, Value>, rules: &[FieldRule]) -> Result<Record, ReshapeError> {
    rules
        .iter()
        .map(|rule| Ok((rule.field.to_string(), rule.resolve(entry)?)))
        .collect()
}

/// Reshapes a single-object payload.
pub fn reshape_object(payload: &Value, rules: &[FieldRule]) -> Result<Record, ReshapeError> {
    let entry = payload
        .as_object()
        .ok_or_else(|| ReshapeError::NotAnObject(kind(payload)))?;
    reshape(entry, rules)
}

/// Reshapes every entry of a list payload's `results` array.
pub fn reshape_results(payload: &Value, rules: &[FieldRule]) -> Result<Vec<Record>, ReshapeError> {
    results_of(payload)?
        .into_iter()
        .map(|entry| reshape(entry, rules))
        .collect()
}

/// The objects in a payload's `results` array. A missing array counts as empty.
pub fn results_of(payload: &Value) -> Result<Vec<&Map<String, Value>>, ReshapeError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ReshapeError::NotAnObject(kind(payload)))?;

    let entries = match obj.get("results") {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => return Err(ReshapeError::ResultsNotArray(kind(other))),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry.as_object().ok_or(ReshapeError::EntryNotObject {
                index,
                kind: kind(entry),
            })
        })
        .collect()
}

/// Truthiness as upstream-agnostic callers expect it: null, false, zero, and
/// empty strings, arrays, or objects are all falsy.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn coalesce(entry: &Map<String, Value>, sources: &[&str]) -> Value {
    sources
        .iter()
        .filter_map(|key| entry.get(*key))
        .find(|v| is_truthy(v))
        .or_else(|| sources.last().and_then(|key| entry.get(*key)))
        .cloned()
        .unwrap_or(Value::Null)
}

fn first_present<'a>(entry: &'a Map<String, Value>, sources: &[&str]) -> Option<&'a Value> {
    sources.iter().find_map(|key| entry.get(*key))
}

const fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Tool inputs and replies.
//!
//! Every tool answers with data. A failure is a reply shaped like a success
//! (a one-element list or a bare object) whose only field is `error`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mapping::Record;

/// Results returned when a caller does not pass `limit`.
pub const DEFAULT_LIMIT: u32 = 10;

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Input for `search_items`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchItemsInput {
    /// Free-text search query
    pub query: String,
    /// Maximum results to return (capped at 50)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Input for `get_item_details`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ItemDetailsInput {
    /// Identifier of the item, as returned by search or listing tools
    pub item_id: String,
}

/// Input for `list_categories`. Takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListCategoriesInput {}

/// Input for `get_popular_items`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PopularItemsInput {
    /// Maximum results to return (capped at 50)
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Restrict to the category with this name (case-insensitive)
    #[serde(default)]
    pub category: Option<String>,
}

/// The inline failure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    /// Human-readable failure message
    pub error: String,
}

/// Reply of a list-producing tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListReply {
    /// Reshaped records
    Records(Vec<Record>),
    /// `[{"error": ...}]`
    Failed([ErrorRecord; 1]),
}

impl ListReply {
    /// A one-element error list.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed([ErrorRecord {
            error: message.into(),
        }])
    }

    /// The failure message, if this reply is an error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Records(_) => None,
            Self::Failed([e]) => Some(&e.error),
        }
    }
}

/// Reply of a single-object tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectReply {
    /// The reshaped record
    Record(Record),
    /// `{"error": ...}`
    Failed(ErrorRecord),
}

impl ObjectReply {
    /// An error object.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(ErrorRecord {
            error: message.into(),
        })
    }

    /// The failure message, if this reply is an error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Record(_) => None,
            Self::Failed(e) => Some(&e.error),
        }
    }
}

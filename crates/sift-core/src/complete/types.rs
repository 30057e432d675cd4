//! Suggestion types

use crate::filter::Operator;
use crate::schema::CommandSchema;
use serde::{Deserialize, Serialize};

/// What a suggestion completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Key,
    Value,
    Operator,
}

/// One entry of the autocomplete dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    /// Replaces the current word (see [`ContextInfo`](crate::context::ContextInfo))
    pub insert_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Suggestion {
    pub(crate) fn key(key: &str, schema: &CommandSchema) -> Self {
        Self {
            label: key.to_string(),
            kind: SuggestionKind::Key,
            insert_text: format!("{key}:"),
            description: (!schema.description.is_empty()).then(|| schema.description.clone()),
        }
    }

    pub(crate) fn value(label: &str, insert_text: String) -> Self {
        Self {
            label: label.to_string(),
            kind: SuggestionKind::Value,
            insert_text,
            description: None,
        }
    }

    pub(crate) fn operator(op: Operator) -> Self {
        Self {
            label: op.symbol().to_string(),
            kind: SuggestionKind::Operator,
            insert_text: op.symbol().to_string(),
            description: Some(op.phrase().to_string()),
        }
    }
}

/// Text and cursor after accepting a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    pub new_text: String,
    pub new_cursor: usize,
}

//! Command schema types

use crate::filter::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type of a filter command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Enum,
    String,
    Numeric,
    Date,
    Boolean,
}

impl CommandType {
    /// Whether this type supports comparison operators when not configured
    pub fn default_supports_operators(&self) -> bool {
        matches!(self, CommandType::Numeric | CommandType::Date)
    }

    /// Operators suggested for values of this type
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            CommandType::Numeric => &Operator::NUMERIC,
            CommandType::Date => &Operator::DATE,
            _ => &[],
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandType::Enum => write!(f, "enum"),
            CommandType::String => write!(f, "string"),
            CommandType::Numeric => write!(f, "numeric"),
            CommandType::Date => write!(f, "date"),
            CommandType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Type and constraint declaration for one filter key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    #[serde(rename = "type")]
    pub kind: CommandType,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supports_operators: Option<bool>,
}

impl CommandSchema {
    pub fn new(kind: CommandType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            allowed_values: Vec::new(),
            supports_operators: None,
        }
    }

    pub fn enumeration<I, S>(description: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_values: values.into_iter().map(Into::into).collect(),
            ..Self::new(CommandType::Enum, description)
        }
    }

    pub fn string(description: impl Into<String>) -> Self {
        Self::new(CommandType::String, description)
    }

    pub fn numeric(description: impl Into<String>) -> Self {
        Self::new(CommandType::Numeric, description)
    }

    pub fn date(description: impl Into<String>) -> Self {
        Self::new(CommandType::Date, description)
    }

    pub fn boolean(description: impl Into<String>) -> Self {
        Self::new(CommandType::Boolean, description)
    }

    /// Override whether comparison operators are offered for this key
    pub fn with_operators(mut self, enabled: bool) -> Self {
        self.supports_operators = Some(enabled);
        self
    }

    pub fn supports_operators(&self) -> bool {
        self.supports_operators
            .unwrap_or_else(|| self.kind.default_supports_operators())
    }

    /// Operators valid for this key, empty when operators are disabled
    pub fn operators(&self) -> &'static [Operator] {
        if self.supports_operators() {
            self.kind.operators()
        } else {
            &[]
        }
    }

    /// Values offered as completions: declared enum values, or `true`/`false`
    pub fn value_choices(&self) -> &[String] {
        match self.kind {
            CommandType::Enum => &self.allowed_values,
            CommandType::Boolean => boolean_choices(),
            _ => &[],
        }
    }
}

fn boolean_choices() -> &'static [String] {
    static CHOICES: std::sync::OnceLock<[String; 2]> = std::sync::OnceLock::new();
    CHOICES.get_or_init(|| ["true".to_string(), "false".to_string()])
}

//! Filter token types

use super::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte range of a token in its source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A parsed `{key, operator, value}` triple
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterToken {
    pub key: String,
    pub operator: Operator,
    /// Unquoted, unescaped value
    pub value: String,
    #[serde(default)]
    pub span: Span,
}

impl FilterToken {
    /// Build a token that did not come from source text (empty span)
    pub fn new(key: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator,
            value: value.into(),
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_quotes = self.value.is_empty()
            || self.value.starts_with(['<', '>', '=', '!'])
            || self
                .value
                .chars()
                .any(|c| c.is_whitespace() || c == '"' || c == '\'');
        match self.operator {
            super::Operator::Match => write!(f, "{}:", self.key)?,
            op => write!(f, "{}:{}", self.key, op)?,
        }
        if needs_quotes {
            write!(f, "\"{}\"", self.value.replace('\\', "\\\\").replace('"', "\\\""))
        } else {
            write!(f, "{}", self.value.replace('\\', "\\\\"))
        }
    }
}

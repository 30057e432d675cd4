//! Advisory checks of parsed tokens against the schema registry
//!
//! Nothing here blocks evaluation. Hosts surface diagnostics as inline
//! hints while the user keeps typing.

use super::{FilterToken, Operator, Span};
use crate::eval::compare::{parse_date, parse_number};
use crate::schema::{CommandType, SchemaRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use strsim::jaro_winkler;

/// Minimum Jaro-Winkler similarity for a "did you mean" hint
const KEY_HINT_THRESHOLD: f64 = 0.8;

/// What is wrong with a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Key is not registered; `suggestion` is the closest registered key
    UnknownKey { suggestion: Option<String> },
    /// Enum value matches none of the declared values
    ValueNotAllowed { allowed: Vec<String> },
    NotNumeric,
    InvalidDate,
    InvalidBoolean,
    /// Ordering operator on a key that does not support it
    OperatorNotSupported { operator: Operator },
}

/// A finding about one token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub key: String,
    pub span: Span,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownKey {
                suggestion: Some(hint),
            } => write!(f, "unknown filter '{}', did you mean '{}'?", self.key, hint),
            DiagnosticKind::UnknownKey { suggestion: None } => {
                write!(f, "unknown filter '{}'", self.key)
            }
            DiagnosticKind::ValueNotAllowed { allowed } => write!(
                f,
                "'{}' expects one of: {}",
                self.key,
                allowed.join(", ")
            ),
            DiagnosticKind::NotNumeric => write!(f, "'{}' expects a number", self.key),
            DiagnosticKind::InvalidDate => {
                write!(f, "'{}' expects a date like 2024-01-31", self.key)
            }
            DiagnosticKind::InvalidBoolean => {
                write!(f, "'{}' expects true or false", self.key)
            }
            DiagnosticKind::OperatorNotSupported { operator } => {
                write!(f, "'{}' does not support '{}'", self.key, operator)
            }
        }
    }
}

/// Check every token, returning findings in token order
pub fn diagnose(registry: &SchemaRegistry, tokens: &[FilterToken]) -> Vec<Diagnostic> {
    tokens
        .iter()
        .filter_map(|token| {
            diagnose_token(registry, token).map(|kind| Diagnostic {
                key: token.key.clone(),
                span: token.span,
                kind,
            })
        })
        .collect()
}

fn diagnose_token(registry: &SchemaRegistry, token: &FilterToken) -> Option<DiagnosticKind> {
    let Some(schema) = registry.get_schema(&token.key) else {
        return Some(DiagnosticKind::UnknownKey {
            suggestion: closest_key(registry, &token.key),
        });
    };

    if token.operator.is_ordering() && !schema.operators().contains(&token.operator) {
        return Some(DiagnosticKind::OperatorNotSupported {
            operator: token.operator,
        });
    }

    let value = token.value.as_str();
    match schema.kind {
        CommandType::Enum => {
            let lower = value.to_lowercase();
            let known = schema.allowed_values.iter().any(|allowed| {
                let allowed = allowed.to_lowercase();
                match token.operator {
                    Operator::Match | Operator::Eq => allowed.contains(&lower),
                    _ => allowed == lower,
                }
            });
            (!known).then(|| DiagnosticKind::ValueNotAllowed {
                allowed: schema.allowed_values.clone(),
            })
        }
        CommandType::Numeric => parse_number(value)
            .is_none()
            .then_some(DiagnosticKind::NotNumeric),
        CommandType::Date => parse_date(value)
            .is_none()
            .then_some(DiagnosticKind::InvalidDate),
        CommandType::Boolean => {
            let valid = value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false");
            (!valid).then_some(DiagnosticKind::InvalidBoolean)
        }
        CommandType::String => None,
    }
}

/// Closest registered key by Jaro-Winkler similarity
pub fn closest_key(registry: &SchemaRegistry, key: &str) -> Option<String> {
    let lower = key.to_lowercase();
    registry
        .keys()
        .map(|candidate| (candidate, jaro_winkler(&lower, &candidate.to_lowercase())))
        .filter(|(_, score)| *score >= KEY_HINT_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(candidate, _)| candidate.to_string())
}

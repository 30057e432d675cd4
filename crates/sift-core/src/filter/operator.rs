//! Filter operators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator joining a filter key to its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `key:value` - equality or substring match
    #[serde(rename = ":")]
    Match,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

/// Comparison symbols, longest first so that `>=` wins over `>`
const COMPARISONS: [Operator; 6] = [
    Operator::Ge,
    Operator::Le,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::Eq,
];

impl Operator {
    /// Operators offered for numeric keys, in suggestion order
    pub const NUMERIC: [Operator; 6] = [
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
        Operator::Ne,
        Operator::Ge,
        Operator::Le,
    ];

    /// Operators offered for date keys, in suggestion order
    pub const DATE: [Operator; 3] = [Operator::Gt, Operator::Lt, Operator::Eq];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Match => ":",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ":" => Some(Operator::Match),
            "=" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Ge),
            "<=" => Some(Operator::Le),
            _ => None,
        }
    }

    /// Split a leading comparison symbol off `input` (longest match)
    pub fn strip_comparison(input: &str) -> Option<(Operator, &str)> {
        COMPARISONS
            .iter()
            .find_map(|op| input.strip_prefix(op.symbol()).map(|rest| (*op, rest)))
    }

    /// Ordering comparisons only make sense on numbers and dates
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le
        )
    }

    /// Phrase used when describing a filter in prose
    pub fn phrase(&self) -> &'static str {
        match self {
            Operator::Match => "matches",
            Operator::Eq => "equals",
            Operator::Ne => "does not equal",
            Operator::Gt => "greater than",
            Operator::Lt => "less than",
            Operator::Ge => "at least",
            Operator::Le => "at most",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

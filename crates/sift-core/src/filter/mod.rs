//! Filter Tokenizer
//!
//! Parses filter expressions like `status:active score:>50 owner:"Jane Doe"`
//! into `{key, operator, value}` tokens.
//!
//! # Grammar
//!
//! ```text
//! expression ::= (token | skipped)*
//! token      ::= key op value
//! key        ::= [^\s:=<>!"'\\]+
//! op         ::= ":" [cmp] | cmp
//! cmp        ::= ">=" | "<=" | "!=" | ">" | "<" | "="
//! value      ::= quoted | bare
//! quoted     ::= '"' ('\' any | [^"])* '"'?  |  "'" ('\' any | [^'])* "'"?
//! bare       ::= ('\' any | [^\s])+
//! ```
//!
//! Anything that is not a complete token (a bare word, a key with no
//! value, a word starting with an operator) is skipped up to the next
//! whitespace.
//!
//! # Example
//!
//! ```rust
//! use sift_core::filter::{parse, Operator};
//!
//! let tokens = parse("status:active score:>50 owner:\"Jane Doe\" created:");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1].operator, Operator::Gt);
//! assert_eq!(tokens[2].value, "Jane Doe");
//! ```

mod describe;
pub mod diagnostics;
pub(crate) mod lexer;
mod operator;
mod token;

pub use describe::describe_filters;
pub use diagnostics::{closest_key, diagnose, Diagnostic, DiagnosticKind};
pub use lexer::FilterLexer;
pub use operator::Operator;
pub use token::{FilterToken, Span};

/// Parse an expression into tokens, dropping incomplete ones
pub fn parse(input: &str) -> Vec<FilterToken> {
    FilterLexer::new(input).collect()
}

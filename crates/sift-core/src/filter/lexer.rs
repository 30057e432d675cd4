//! Single-pass lexer for filter expressions
//!
//! Scans left to right with explicit in-quote / out-of-quote state and never
//! backtracks. Words that do not form a complete `key op value` triple are
//! skipped so a half-typed trailing token never hides the tokens before it.

use super::token::{FilterToken, Span};
use super::Operator;

/// Characters allowed in the key half of a token
pub(crate) fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ':' | '=' | '<' | '>' | '!' | '"' | '\'' | '\\')
}

/// Lexer yielding complete filter tokens
pub struct FilterLexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> FilterLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.position += n;
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.advance(c.len_utf8());
            } else {
                break;
            }
        }
    }

    /// Drop the rest of a malformed word
    fn skip_word(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                break;
            }
            self.advance(c.len_utf8());
        }
    }

    fn read_key(&mut self) -> &'a str {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if !is_key_char(c) {
                break;
            }
            self.advance(c.len_utf8());
        }
        &self.input[start..self.position]
    }

    /// `:` optionally followed by a comparison, or a bare comparison
    fn read_operator(&mut self) -> Option<Operator> {
        let rest = self.remaining();
        if let Some(after_colon) = rest.strip_prefix(':') {
            self.advance(1);
            return match Operator::strip_comparison(after_colon) {
                Some((op, _)) => {
                    self.advance(op.symbol().len());
                    Some(op)
                }
                None => Some(Operator::Match),
            };
        }

        let (op, _) = Operator::strip_comparison(rest)?;
        self.advance(op.symbol().len());
        Some(op)
    }

    fn read_value(&mut self) -> String {
        match self.peek_char() {
            Some(quote @ ('"' | '\'')) => self.read_quoted(quote),
            Some(c) if !c.is_whitespace() => self.read_bare(),
            _ => String::new(),
        }
    }

    /// Quoted value; an unterminated quote runs to end of input
    fn read_quoted(&mut self, quote: char) -> String {
        self.advance(quote.len_utf8());
        let mut value = String::new();

        while let Some(c) = self.peek_char() {
            self.advance(c.len_utf8());
            if c == quote {
                break;
            }
            if c == '\\' {
                match self.peek_char() {
                    Some(escaped) => {
                        self.advance(escaped.len_utf8());
                        value.push(escaped);
                    }
                    None => value.push('\\'),
                }
            } else {
                value.push(c);
            }
        }

        value
    }

    fn read_bare(&mut self) -> String {
        let mut value = String::new();

        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                break;
            }
            self.advance(c.len_utf8());
            if c == '\\' {
                match self.peek_char() {
                    Some(escaped) => {
                        self.advance(escaped.len_utf8());
                        value.push(escaped);
                    }
                    None => value.push('\\'),
                }
            } else {
                value.push(c);
            }
        }

        value
    }

    fn next_token(&mut self) -> Option<FilterToken> {
        loop {
            self.skip_whitespace();
            self.peek_char()?;

            let start = self.position;
            let key = self.read_key();
            if key.is_empty() {
                self.skip_word();
                continue;
            }

            let Some(operator) = self.read_operator() else {
                self.skip_word();
                continue;
            };

            let value = self.read_value();
            if value.is_empty() {
                continue;
            }

            return Some(FilterToken {
                key: key.to_string(),
                operator,
                value,
                span: Span::new(start, self.position),
            });
        }
    }
}

impl Iterator for FilterLexer<'_> {
    type Item = FilterToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

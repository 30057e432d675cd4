//! Plain-language rendering of a filter expression

use super::FilterToken;

/// Describe tokens as one sentence, e.g. `status equals active AND score greater than 50`
pub fn describe_filters(tokens: &[FilterToken]) -> String {
    if tokens.is_empty() {
        return "no filters".to_string();
    }

    tokens
        .iter()
        .map(describe_token)
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn describe_token(token: &FilterToken) -> String {
    format!("{} {} {}", token.key, token.operator.phrase(), token.value)
}

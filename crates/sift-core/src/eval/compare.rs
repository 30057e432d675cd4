//! Type-aware comparison of a row value against a token value

use crate::filter::Operator;
use crate::schema::CommandType;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Finite float, or `None`
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// RFC 3339 date-time, `YYYY-MM-DDTHH:MM:SS`, or a plain `YYYY-MM-DD` (midnight)
pub(crate) fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Does `actual` (row value) satisfy `op expected` (token value)?
///
/// `kind` is the key's schema type, `None` for unregistered keys.
pub(crate) fn compare(kind: Option<CommandType>, op: Operator, actual: &str, expected: &str) -> bool {
    let is_date = kind == Some(CommandType::Date);
    match op {
        Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le => {
            let ordering = if is_date {
                Some(date_ordering(actual, expected))
            } else {
                match (parse_number(actual), parse_number(expected)) {
                    (Some(a), Some(b)) => a.partial_cmp(&b),
                    _ => None,
                }
            };
            ordering.is_some_and(|ord| ordering_holds(op, ord))
        }
        Operator::Eq | Operator::Match => {
            if let (Some(a), Some(b)) = (parse_number(actual), parse_number(expected)) {
                return a == b;
            }
            if is_date && dates_equal(actual, expected) {
                return true;
            }
            let actual = actual.to_lowercase();
            let expected = expected.to_lowercase();
            actual == expected || actual.contains(&expected)
        }
        Operator::Ne => {
            if let (Some(a), Some(b)) = (parse_number(actual), parse_number(expected)) {
                return a != b;
            }
            if is_date {
                if let (Some(a), Some(b)) = (parse_date(actual), parse_date(expected)) {
                    return a != b;
                }
            }
            actual.to_lowercase() != expected.to_lowercase()
        }
    }
}

/// Calendar order when both sides parse, lexicographic otherwise
fn date_ordering(actual: &str, expected: &str) -> Ordering {
    match (parse_date(actual), parse_date(expected)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => actual.cmp(expected),
    }
}

fn dates_equal(actual: &str, expected: &str) -> bool {
    matches!((parse_date(actual), parse_date(expected)), (Some(a), Some(b)) if a == b)
}

fn ordering_holds(op: Operator, ordering: Ordering) -> bool {
    match op {
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Ge => ordering != Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        _ => false,
    }
}

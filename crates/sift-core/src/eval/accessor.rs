//! Host-supplied access to row fields

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Reads a named field of a row as text.
///
/// Rows stay opaque to the evaluator and summarizer; the host decides how
/// a field name maps onto its own record type. `None` means the row has no
/// usable value for that field.
pub trait RowAccessor<R: ?Sized> {
    fn field<'r>(&self, row: &'r R, name: &str) -> Option<Cow<'r, str>>;
}

impl<R: ?Sized, T: RowAccessor<R> + ?Sized> RowAccessor<R> for &T {
    fn field<'r>(&self, row: &'r R, name: &str) -> Option<Cow<'r, str>> {
        (**self).field(row, name)
    }
}

/// Accessor for string maps
#[derive(Debug, Clone, Copy, Default)]
pub struct MapAccessor;

impl<S: BuildHasher> RowAccessor<HashMap<String, String, S>> for MapAccessor {
    fn field<'r>(&self, row: &'r HashMap<String, String, S>, name: &str) -> Option<Cow<'r, str>> {
        row.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl RowAccessor<BTreeMap<String, String>> for MapAccessor {
    fn field<'r>(&self, row: &'r BTreeMap<String, String>, name: &str) -> Option<Cow<'r, str>> {
        row.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// Accessor for JSON objects.
///
/// Scalars are read as text (numbers and booleans are stringified); null,
/// arrays and nested objects count as missing. When a fallback object name
/// is set, fields missing at the top level are looked up inside that
/// nested object, e.g. `{"id": 1, "dataset": {"owner": "ana"}}`.
#[derive(Debug, Clone, Default)]
pub struct JsonAccessor {
    fallback: Option<String>,
}

impl JsonAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(object: impl Into<String>) -> Self {
        Self {
            fallback: Some(object.into()),
        }
    }

    fn lookup<'r>(&self, row: &'r Map<String, Value>, name: &str) -> Option<Cow<'r, str>> {
        if let Some(text) = row.get(name).and_then(scalar_text) {
            return Some(text);
        }
        let nested = row.get(self.fallback.as_deref()?)?.as_object()?;
        nested.get(name).and_then(scalar_text)
    }
}

impl RowAccessor<Value> for JsonAccessor {
    fn field<'r>(&self, row: &'r Value, name: &str) -> Option<Cow<'r, str>> {
        self.lookup(row.as_object()?, name)
    }
}

impl RowAccessor<Map<String, Value>> for JsonAccessor {
    fn field<'r>(&self, row: &'r Map<String, Value>, name: &str) -> Option<Cow<'r, str>> {
        self.lookup(row, name)
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Adapts a closure returning owned text into an accessor
#[derive(Debug, Clone, Copy)]
pub struct FnAccessor<F>(pub F);

impl<R: ?Sized, F> RowAccessor<R> for FnAccessor<F>
where
    F: Fn(&R, &str) -> Option<String>,
{
    fn field<'r>(&self, row: &'r R, name: &str) -> Option<Cow<'r, str>> {
        (self.0)(row, name).map(Cow::Owned)
    }
}

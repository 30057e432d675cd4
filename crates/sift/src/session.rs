//! Filter session over a JSON row set
//!
//! Ties the registry, config and rows together so a host only has to feed
//! in the text box contents and cursor on each keystroke.

use crate::config::SiftConfig;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use sift_core::{
    describe_filters, diagnose, parse, AggregateMetrics, Autocomplete, Diagnostic, Evaluator,
    FilterToken, Insertion, JsonAccessor, SchemaRegistry, Summarizer, Suggestion,
};
use std::path::Path;
use tracing::{debug, warn};

/// Everything a results view needs after one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome<'s> {
    pub tokens: Vec<FilterToken>,
    pub description: String,
    pub diagnostics: Vec<Diagnostic>,
    pub rows: Vec<&'s Value>,
    pub metrics: AggregateMetrics,
}

pub struct FilterSession {
    registry: SchemaRegistry,
    config: SiftConfig,
    rows: Vec<Value>,
}

impl FilterSession {
    pub fn new(config: SiftConfig, rows: Vec<Value>) -> Result<Self> {
        let registry = config.registry()?;
        debug!(keys = registry.len(), rows = rows.len(), "session ready");
        Ok(Self {
            registry,
            config,
            rows,
        })
    }

    /// Replace the row set, keeping schema and config
    pub fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn config(&self) -> &SiftConfig {
        &self.config
    }

    pub fn suggest(&self, text: &str, cursor: usize) -> Vec<Suggestion> {
        Autocomplete::new(&self.registry).suggest(text, cursor)
    }

    pub fn complete(&self, text: &str, cursor: usize, suggestion: &Suggestion) -> Insertion {
        Autocomplete::new(&self.registry).complete(text, cursor, suggestion)
    }

    /// Parse, filter and summarize in one pass.
    ///
    /// Fails only when the unknown-key policy is `reject` and the
    /// expression names an unregistered key.
    pub fn evaluate(&self, text: &str) -> Result<FilterOutcome<'_>> {
        let tokens = parse(text);
        let diagnostics = diagnose(&self.registry, &tokens);
        for diagnostic in &diagnostics {
            warn!(key = %diagnostic.key, "{}", diagnostic);
        }

        let evaluator = self.evaluator();
        evaluator.check(&tokens).map_err(Error::from)?;
        let rows = evaluator.apply(&self.rows, &tokens);
        let metrics = self.summarizer().summarize(rows.iter().copied());

        debug!(
            tokens = tokens.len(),
            matched = rows.len(),
            total = self.rows.len(),
            risk = %metrics.risk_level,
            "evaluated filter"
        );

        Ok(FilterOutcome {
            description: describe_filters(&tokens),
            tokens,
            diagnostics,
            rows,
            metrics,
        })
    }

    /// Metrics over the unfiltered row set
    pub fn summarize_all(&self) -> AggregateMetrics {
        self.summarizer().summarize(&self.rows)
    }

    fn evaluator(&self) -> Evaluator<'_, JsonAccessor> {
        Evaluator::new(&self.registry, self.config.accessor())
            .with_field_map(self.config.field_map.clone())
            .with_unknown_keys(self.config.unknown_keys)
    }

    fn summarizer(&self) -> Summarizer<JsonAccessor> {
        Summarizer::new(self.config.accessor()).with_config(self.config.summary.clone())
    }
}

/// Read rows from a JSON file holding an array of objects
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str(&text)? {
        Value::Array(rows) => {
            debug!(path = %path.display(), rows = rows.len(), "loaded rows");
            Ok(rows)
        }
        _ => Err(Error::Config(format!(
            "{}: expected a JSON array of rows",
            path.display()
        ))),
    }
}

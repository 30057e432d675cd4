//! sift Core Engine
//!
//! Filter query language and context-aware autocomplete for tabular data.
//! Expressions like `status:active score:>50` are parsed against a schema
//! registry, applied to host rows with AND semantics, and summarized.
//!
//! Every operation is pure and synchronous, so it is safe to run on every
//! keystroke. The only shared state is the immutable [`SchemaRegistry`].
//!
//! # Features
//!
//! - `parallel` - rayon-backed [`Evaluator::apply_parallel`](eval::Evaluator) for large row sets
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sift_core::complete::Autocomplete;
//! use sift_core::eval::{Evaluator, JsonAccessor};
//! use sift_core::filter::{describe_filters, parse};
//! use sift_core::schema::SchemaRegistry;
//! use sift_core::summary::Summarizer;
//!
//! let registry = SchemaRegistry::dashboard();
//!
//! // Suggestions for the word under the cursor
//! let suggestions = Autocomplete::new(&registry).suggest("status:ac", 9);
//! assert_eq!(suggestions[0].insert_text, "active ");
//!
//! // Parse, filter, summarize
//! let tokens = parse("status:active health:>50");
//! assert_eq!(describe_filters(&tokens), "status matches active AND health greater than 50");
//!
//! let rows = vec![
//!     json!({"status": "active", "health": 80}),
//!     json!({"status": "paused", "health": 90}),
//! ];
//! let kept = Evaluator::new(&registry, JsonAccessor::new()).apply(&rows, &tokens);
//! let metrics = Summarizer::new(JsonAccessor::new()).summarize(kept);
//! assert_eq!(metrics.count, 1);
//! ```

pub mod complete;
pub mod context;
pub mod error;
pub mod eval;
pub mod filter;
pub mod schema;
pub mod summary;

// Re-export main types at crate root
pub use complete::{apply_insertion, Autocomplete, Insertion, Suggestion, SuggestionKind};
pub use context::{parse_context, ContextInfo};
pub use error::{FilterError, SchemaError};
pub use eval::{Evaluator, FieldMap, JsonAccessor, MapAccessor, RowAccessor, UnknownKeyPolicy};
pub use filter::{
    describe_filters, diagnose, parse, Diagnostic, DiagnosticKind, FilterToken, Operator, Span,
};
pub use schema::{CommandSchema, CommandType, SchemaConfig, SchemaRegistry};
pub use summary::{AggregateMetrics, HealthDistribution, RiskLevel, Summarizer, SummaryConfig};

//! Filter Evaluator
//!
//! Applies parsed tokens to host rows. A row is kept only when every token
//! matches. Matching depends on the operator and on the key's schema type:
//!
//! - `>`, `<`, `>=`, `<=`: numeric (calendar order for date keys); an
//!   operand that does not parse fails the token for that row
//! - `:` and `=`: numeric equality when both sides are numbers, otherwise
//!   case-insensitive equality or substring containment
//! - `!=`: numeric or case-insensitive inequality
//!
//! Rows are read through a [`RowAccessor`] supplied by the host.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sift_core::eval::{Evaluator, JsonAccessor};
//! use sift_core::filter::parse;
//! use sift_core::schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::dashboard();
//! let rows = vec![json!({"score": "40"}), json!({"score": "60"}), json!({"score": "abc"})];
//! let evaluator = Evaluator::new(&registry, JsonAccessor::new());
//!
//! let kept = evaluator.apply(&rows, &parse("score:>50"));
//! assert_eq!(kept, vec![&json!({"score": "60"})]);
//! ```

mod accessor;
pub(crate) mod compare;
mod evaluator;

pub use accessor::{FnAccessor, JsonAccessor, MapAccessor, RowAccessor};
pub use evaluator::{Evaluator, FieldMap, UnknownKeyPolicy};

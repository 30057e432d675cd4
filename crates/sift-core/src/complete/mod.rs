//! Autocomplete Engine
//!
//! Produces suggestions for the word under the cursor:
//!
//! 1. Key position: registered keys matching the typed prefix (`insert_text` = `key:`)
//! 2. Enum / boolean value: matching declared values (`insert_text` = `value `)
//! 3. Numeric / date value: operators while the typed text is an operator
//!    prefix, then example literals (`0`, `10`, `100`, or today's date)
//! 4. String value or unknown key: nothing
//!
//! # Example
//!
//! ```rust
//! use sift_core::complete::{apply_insertion, Autocomplete};
//! use sift_core::schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::dashboard();
//! let engine = Autocomplete::new(&registry);
//!
//! let suggestions = engine.suggest("status:ac", 9);
//! assert_eq!(suggestions[0].label, "active");
//!
//! let next = apply_insertion("status:ac", 9, &suggestions[0].insert_text);
//! assert_eq!(next.new_text, "status:active ");
//! assert_eq!(next.new_cursor, 14);
//! ```

mod engine;
mod types;

pub use engine::{apply_insertion, Autocomplete};
pub use types::{Insertion, Suggestion, SuggestionKind};

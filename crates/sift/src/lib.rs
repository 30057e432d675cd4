//! sift host library
//!
//! Loads configuration and JSON rows, wires up logging, and runs filter
//! sessions on top of [`sift_core`]. The `sift` binary is a thin clap
//! front end over [`FilterSession`].

pub mod config;
pub mod error;
pub mod session;
pub mod tracing;

pub use config::SiftConfig;
pub use error::{Error, Result};
pub use session::{load_rows, FilterOutcome, FilterSession};

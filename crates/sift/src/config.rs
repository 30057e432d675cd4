//! Host configuration
//!
//! A single JSON document. Every field is optional:
//!
//! ```json
//! {
//!   "commands": {
//!     "status": {"type": "enum", "description": "State", "allowed_values": ["open", "closed"]},
//!     "points": {"type": "numeric"}
//!   },
//!   "field_map": {"created-by": "createdBy"},
//!   "unknown_keys": "reject",
//!   "fallback_object": "dataset",
//!   "summary": {"health_field": "hp", "risk": {"watch_status": "at_risk"}}
//! }
//! ```
//!
//! Without `commands` the built-in dashboard schema is used.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sift_core::{
    CommandSchema, FieldMap, JsonAccessor, SchemaRegistry, SummaryConfig, UnknownKeyPolicy,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    /// Schema table; `None` selects the dashboard schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands: Option<BTreeMap<String, CommandSchema>>,
    /// Filter key to row field remapping
    pub field_map: FieldMap,
    pub unknown_keys: UnknownKeyPolicy,
    /// Nested object consulted when a row lacks a field at the top level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_object: Option<String>,
    pub summary: SummaryConfig,
}

impl SiftConfig {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            custom_schema = config.commands.is_some(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the schema registry this config describes
    pub fn registry(&self) -> Result<SchemaRegistry> {
        match &self.commands {
            Some(commands) => Ok(SchemaRegistry::new(commands.clone())?),
            None => Ok(SchemaRegistry::dashboard()),
        }
    }

    /// Row accessor for JSON rows
    pub fn accessor(&self) -> JsonAccessor {
        match &self.fallback_object {
            Some(object) => JsonAccessor::with_fallback(object.clone()),
            None => JsonAccessor::new(),
        }
    }
}

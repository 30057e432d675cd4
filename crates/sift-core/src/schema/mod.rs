//! Command Schema Registry
//!
//! Static table mapping a filter key to its type, allowed values and
//! operator support. A registry is built once and shared read-only by the
//! context parser, autocomplete engine, diagnostics and evaluator.
//!
//! # Example
//!
//! ```rust
//! use sift_core::schema::{CommandSchema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::new([
//!     ("status", CommandSchema::enumeration("Lifecycle state", ["active", "paused"])),
//!     ("score", CommandSchema::numeric("Quality score")),
//! ])
//! .unwrap();
//!
//! assert!(registry.is_valid_key("STATUS"));
//! assert_eq!(registry.allowed_values("status"), ["active", "paused"]);
//! assert!(registry.supports_operators("score"));
//! ```

mod types;

pub use types::{CommandSchema, CommandType};

use crate::error::SchemaError;
use crate::filter::lexer::is_key_char;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized form of a schema table: `{"commands": {name: schema}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub commands: BTreeMap<String, CommandSchema>,
}

/// Immutable lookup table of filter commands
///
/// Keys are matched case-insensitively and iterated alphabetically. Each key
/// keeps the case it was declared with, which is also the row field name.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Declared keys, sorted by lowercase key
    commands: Vec<(String, CommandSchema)>,
    /// Lowercase key -> position in `commands`
    index: AHashMap<String, usize>,
}

impl SchemaRegistry {
    /// Build a registry, validating every entry
    pub fn new<I, K>(entries: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, CommandSchema)>,
        K: Into<String>,
    {
        let mut commands = Vec::new();
        for (key, schema) in entries {
            let key = key.into();
            validate_entry(&key, &schema)?;
            commands.push((key, schema));
        }

        sort_by_folded_key(&mut commands);
        if let Some(pair) = commands
            .windows(2)
            .find(|w| w[0].0.to_lowercase() == w[1].0.to_lowercase())
        {
            return Err(SchemaError::DuplicateKey(pair[1].0.clone()));
        }

        Ok(Self::from_sorted(commands))
    }

    /// Build from a decoded schema table
    pub fn from_config(config: SchemaConfig) -> Result<Self, SchemaError> {
        Self::new(config.commands)
    }

    /// Build from JSON of the form `{"commands": {"status": {"type": "enum", ...}}}`
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let config: SchemaConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Built-in table for the project dashboard dataset
    pub fn dashboard() -> Self {
        let mut commands: Vec<(String, CommandSchema)> = vec![
            (
                "status".into(),
                CommandSchema::enumeration(
                    "Lifecycle state of the project",
                    ["active", "paused", "watch", "archived"],
                ),
            ),
            (
                "region".into(),
                CommandSchema::enumeration("Sales region", ["na", "emea", "apac", "latam"]),
            ),
            ("owner".into(), CommandSchema::string("Project owner (fuzzy match)")),
            (
                "created-by".into(),
                CommandSchema::string("Author of the record (fuzzy match)"),
            ),
            ("tag".into(), CommandSchema::string("Free-form label")),
            ("score".into(), CommandSchema::numeric("Quality score, 0-100")),
            ("health".into(), CommandSchema::numeric("Health index, 0-100")),
            ("revenue".into(), CommandSchema::numeric("Annual revenue")),
            ("created".into(), CommandSchema::date("Creation date (YYYY-MM-DD)")),
            ("updated".into(), CommandSchema::date("Last update (YYYY-MM-DD)")),
            ("pinned".into(), CommandSchema::boolean("Pinned to the top")),
        ];
        sort_by_folded_key(&mut commands);
        Self::from_sorted(commands)
    }

    fn from_sorted(commands: Vec<(String, CommandSchema)>) -> Self {
        let index = commands
            .iter()
            .enumerate()
            .map(|(i, (key, _))| (key.to_lowercase(), i))
            .collect();
        Self { commands, index }
    }

    pub fn get_schema(&self, key: &str) -> Option<&CommandSchema> {
        self.position(key).map(|i| &self.commands[i].1)
    }

    pub fn is_valid_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Key as declared, for a key typed in any case
    pub fn canonical_key(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.commands[i].0.as_str())
    }

    /// Declared enum values, empty for every other type or unknown keys
    pub fn allowed_values(&self, key: &str) -> &[String] {
        match self.get_schema(key) {
            Some(schema) if schema.kind == CommandType::Enum => &schema.allowed_values,
            _ => &[],
        }
    }

    pub fn supports_operators(&self, key: &str) -> bool {
        self.get_schema(key)
            .map(CommandSchema::supports_operators)
            .unwrap_or(false)
    }

    /// Registered keys in alphabetical order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in alphabetical key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandSchema)> {
        self.commands.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Export the table back into its serializable form
    pub fn to_config(&self) -> SchemaConfig {
        SchemaConfig {
            commands: self
                .commands
                .iter()
                .map(|(key, schema)| (key.clone(), schema.clone()))
                .collect(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        if let Some(&i) = self.index.get(key) {
            return Some(i);
        }
        self.index.get(key.to_lowercase().as_str()).copied()
    }
}

fn sort_by_folded_key(commands: &mut [(String, CommandSchema)]) {
    commands.sort_by_cached_key(|(key, _)| key.to_lowercase());
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::dashboard()
    }
}

fn validate_entry(key: &str, schema: &CommandSchema) -> Result<(), SchemaError> {
    if key.is_empty() {
        return Err(SchemaError::EmptyKey);
    }
    if !key.chars().all(is_key_char) {
        return Err(SchemaError::InvalidKey {
            key: key.to_string(),
        });
    }
    if schema.kind == CommandType::Enum && schema.allowed_values.is_empty() {
        return Err(SchemaError::MissingValues {
            key: key.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dashboard_keys_sorted() {
        let registry = SchemaRegistry::dashboard();
        let keys: Vec<_> = registry.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&"created-by"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = SchemaRegistry::dashboard();
        assert_eq!(
            registry.get_schema("Status").map(|s| s.kind),
            Some(CommandType::Enum)
        );
        assert!(registry.is_valid_key("SCORE"));
    }

    #[test]
    fn test_declared_case_is_kept() {
        let registry = SchemaRegistry::new([
            ("createdBy", CommandSchema::string("")),
            ("Amount", CommandSchema::numeric("")),
            ("zone", CommandSchema::string("")),
        ])
        .unwrap();
        assert_eq!(
            registry.keys().collect::<Vec<_>>(),
            vec!["Amount", "createdBy", "zone"]
        );
        assert_eq!(registry.canonical_key("CREATEDBY"), Some("createdBy"));
        assert_eq!(registry.canonical_key("createdBy"), Some("createdBy"));
        assert_eq!(registry.canonical_key("amount"), Some("Amount"));
        assert_eq!(registry.canonical_key("created"), None);
        assert!(registry.is_valid_key("createdby"));
    }

    #[test]
    fn test_unknown_key_lookups_are_empty() {
        let registry = SchemaRegistry::dashboard();
        assert!(registry.get_schema("nope").is_none());
        assert!(!registry.is_valid_key("nope"));
        assert!(registry.allowed_values("nope").is_empty());
        assert!(!registry.supports_operators("nope"));
    }

    #[test]
    fn test_schema_defined_iff_valid_key() {
        let registry = SchemaRegistry::dashboard();
        for key in ["status", "owner", "score", "created", "pinned", "", "x", "status:"] {
            assert_eq!(registry.get_schema(key).is_some(), registry.is_valid_key(key));
        }
    }

    #[test]
    fn test_allowed_values_only_for_enums() {
        let registry = SchemaRegistry::dashboard();
        assert_eq!(
            registry.allowed_values("status"),
            ["active", "paused", "watch", "archived"]
        );
        assert!(registry.allowed_values("score").is_empty());
        assert!(registry.allowed_values("pinned").is_empty());
    }

    #[test]
    fn test_operator_defaults_and_override() {
        let registry = SchemaRegistry::new([
            ("score", CommandSchema::numeric("")),
            ("rank", CommandSchema::numeric("").with_operators(false)),
            ("owner", CommandSchema::string("")),
        ])
        .unwrap();
        assert!(registry.supports_operators("score"));
        assert!(!registry.supports_operators("rank"));
        assert!(!registry.supports_operators("owner"));
    }

    #[test]
    fn test_rejects_invalid_entries() {
        assert_eq!(
            SchemaRegistry::new([("", CommandSchema::string(""))]).unwrap_err(),
            SchemaError::EmptyKey
        );
        assert!(matches!(
            SchemaRegistry::new([("a:b", CommandSchema::string(""))]),
            Err(SchemaError::InvalidKey { .. })
        ));
        assert_eq!(
            SchemaRegistry::new([
                ("Owner", CommandSchema::string("")),
                ("owner", CommandSchema::string("")),
            ])
            .unwrap_err(),
            SchemaError::DuplicateKey("owner".into())
        );
        assert!(matches!(
            SchemaRegistry::new([("status", CommandSchema::enumeration("", Vec::<String>::new()))]),
            Err(SchemaError::MissingValues { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let registry = SchemaRegistry::from_json(
            r#"{"commands": {
                "status": {"type": "enum", "description": "state", "allowed_values": ["on", "off"]},
                "size": {"type": "numeric", "supports_operators": false}
            }}"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.allowed_values("status"), ["on", "off"]);
        assert!(!registry.supports_operators("size"));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SchemaRegistry::from_json("{\"commands\": 3}"),
            Err(SchemaError::Config(_))
        ));
    }

    #[test]
    fn test_config_roundtrip_preserves_table() {
        let registry = SchemaRegistry::dashboard();
        let rebuilt = SchemaRegistry::from_config(registry.to_config()).unwrap();
        assert_eq!(
            registry.iter().collect::<Vec<_>>(),
            rebuilt.iter().collect::<Vec<_>>()
        );
    }
}

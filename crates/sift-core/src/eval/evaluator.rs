//! Conjunctive filter evaluation

use super::accessor::RowAccessor;
use super::compare::compare;
use crate::error::FilterError;
use crate::filter::{FilterToken, Operator};
use crate::schema::{CommandType, SchemaRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Row count at which `apply_parallel` switches to rayon
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 1000;

/// What to do with tokens whose key is not registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Compare against the row field of the same name, untyped
    #[default]
    Evaluate,
    /// Treat the token as always matching
    Ignore,
    /// The whole expression matches nothing
    Reject,
}

/// Remaps filter keys (`created-by`) to row fields (`createdBy`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FieldMap(BTreeMap<String, String>);

impl From<BTreeMap<String, String>> for FieldMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<FieldMap> for BTreeMap<String, String> {
    fn from(map: FieldMap) -> Self {
        map.0
    }
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, field: impl Into<String>) -> Self {
        self.insert(key, field);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, field: impl Into<String>) {
        self.0.insert(key.into().to_lowercase(), field.into());
    }

    /// Row field for `key`; unmapped keys name their own field
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.0
            .get(key)
            .or_else(|| self.0.get(&key.to_lowercase()))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (key, field) in iter {
            map.insert(key, field);
        }
        map
    }
}

/// A token resolved against the registry and field map
struct Clause<'t> {
    field: &'t str,
    kind: Option<CommandType>,
    operator: Operator,
    value: &'t str,
}

/// Applies filter tokens to host rows with AND semantics
#[derive(Debug, Clone)]
pub struct Evaluator<'r, A> {
    registry: &'r SchemaRegistry,
    accessor: A,
    field_map: FieldMap,
    unknown_keys: UnknownKeyPolicy,
}

impl<'r, A> Evaluator<'r, A> {
    pub fn new(registry: &'r SchemaRegistry, accessor: A) -> Self {
        Self {
            registry,
            accessor,
            field_map: FieldMap::default(),
            unknown_keys: UnknownKeyPolicy::default(),
        }
    }

    pub fn with_field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    pub fn with_unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn unknown_keys(&self) -> UnknownKeyPolicy {
        self.unknown_keys
    }

    /// Fails only under [`UnknownKeyPolicy::Reject`], on the first unknown key
    pub fn check(&self, tokens: &[FilterToken]) -> Result<(), FilterError> {
        if self.unknown_keys != UnknownKeyPolicy::Reject {
            return Ok(());
        }
        match tokens
            .iter()
            .find(|t| !self.registry.is_valid_key(&t.key))
        {
            Some(token) => Err(FilterError::UnknownKey {
                key: token.key.clone(),
                position: token.span.start,
            }),
            None => Ok(()),
        }
    }

    /// Whether `row` satisfies every token
    pub fn matches<R: ?Sized>(&self, row: &R, tokens: &[FilterToken]) -> bool
    where
        A: RowAccessor<R>,
    {
        match self.plan(tokens) {
            Some(clauses) => self.row_matches(row, &clauses),
            None => false,
        }
    }

    /// Rows satisfying every token, in input order
    pub fn apply<'a, R, I>(&self, rows: I, tokens: &[FilterToken]) -> Vec<&'a R>
    where
        R: ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
        A: RowAccessor<R>,
    {
        let Some(clauses) = self.plan(tokens) else {
            return Vec::new();
        };
        rows.into_iter()
            .filter(|row| self.row_matches(*row, &clauses))
            .collect()
    }

    /// Like [`apply`](Self::apply), splitting large inputs across threads
    #[cfg(feature = "parallel")]
    pub fn apply_parallel<'a, R>(&self, rows: &'a [R], tokens: &[FilterToken]) -> Vec<&'a R>
    where
        R: Sync,
        A: RowAccessor<R> + Sync,
    {
        if rows.len() < PARALLEL_THRESHOLD {
            return self.apply(rows, tokens);
        }
        let Some(clauses) = self.plan(tokens) else {
            return Vec::new();
        };
        rows.par_iter()
            .filter(|row| self.row_matches(*row, &clauses))
            .collect()
    }

    /// Resolve tokens once per call; `None` means nothing can match
    fn plan<'t>(&'t self, tokens: &'t [FilterToken]) -> Option<Vec<Clause<'t>>> {
        let mut clauses = Vec::with_capacity(tokens.len());
        for token in tokens {
            let kind = self.registry.get_schema(&token.key).map(|s| s.kind);
            let key = match self.registry.canonical_key(&token.key) {
                Some(declared) => declared,
                None => match self.unknown_keys {
                    UnknownKeyPolicy::Evaluate => token.key.as_str(),
                    UnknownKeyPolicy::Ignore => continue,
                    UnknownKeyPolicy::Reject => return None,
                },
            };
            clauses.push(Clause {
                field: self.field_map.resolve(key),
                kind,
                operator: token.operator,
                value: &token.value,
            });
        }
        Some(clauses)
    }

    fn row_matches<R: ?Sized>(&self, row: &R, clauses: &[Clause<'_>]) -> bool
    where
        A: RowAccessor<R>,
    {
        clauses.iter().all(|clause| {
            self.accessor
                .field(row, clause.field)
                .is_some_and(|actual| compare(clause.kind, clause.operator, &actual, clause.value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{JsonAccessor, MapAccessor};
    use crate::filter::parse;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn rows() -> Vec<Value> {
        vec![
            json!({"id": 1, "status": "active", "owner": "Jane Doe", "score": 72, "createdBy": "ana", "created": "2024-01-10"}),
            json!({"id": 2, "status": "paused", "owner": "Bob Stone", "score": 40, "createdBy": "bo", "created": "2023-11-02"}),
            json!({"id": 3, "status": "watch", "owner": "jane roe", "score": "n/a", "createdBy": "ana", "created": "2024-03-01"}),
            json!({"id": 4, "status": "active", "owner": "Carl", "score": 95.5, "created": "2024-02-29"}),
        ]
    }

    fn ids(rows: &[&Value]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    fn run(input: &str) -> Vec<i64> {
        let registry = SchemaRegistry::dashboard();
        let evaluator = Evaluator::new(&registry, JsonAccessor::new())
            .with_field_map(FieldMap::new().with("created-by", "createdBy"));
        let data = rows();
        ids(&evaluator.apply(&data, &parse(input)))
    }

    #[test]
    fn test_no_tokens_keeps_everything() {
        assert_eq!(run(""), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_conjunction() {
        assert_eq!(run("status:active"), vec![1, 4]);
        assert_eq!(run("status:active score:>80"), vec![4]);
        assert_eq!(run("owner:jane status!=watch"), vec![1]);
    }

    #[test]
    fn test_numeric_skips_unparseable_rows() {
        assert_eq!(run("score:>=40"), vec![1, 2, 4]);
        assert_eq!(run("score:<50"), vec![2]);
    }

    #[test]
    fn test_field_map_remaps_key() {
        assert_eq!(run("created-by:ana"), vec![1, 3]);
    }

    #[test]
    fn test_dates_compare_by_calendar() {
        assert_eq!(run("created:>2024-01-31"), vec![3, 4]);
        assert_eq!(run("created:<2024-01-01"), vec![2]);
    }

    #[test]
    fn test_missing_field_never_matches() {
        assert_eq!(run("created-by:a"), vec![1, 3]);
        assert_eq!(run("created-by!=zzz"), vec![1, 2, 3]);
    }

    #[test]
    fn test_unknown_key_policies() {
        let registry = SchemaRegistry::dashboard();
        let data = rows();
        let tokens = parse("status:active id:4");

        let evaluate = Evaluator::new(&registry, JsonAccessor::new());
        assert_eq!(ids(&evaluate.apply(&data, &tokens)), vec![4]);
        assert!(evaluate.check(&tokens).is_ok());

        let ignore = evaluate.clone().with_unknown_keys(UnknownKeyPolicy::Ignore);
        assert_eq!(ids(&ignore.apply(&data, &tokens)), vec![1, 4]);

        let reject = evaluate.with_unknown_keys(UnknownKeyPolicy::Reject);
        assert!(reject.apply(&data, &tokens).is_empty());
        assert!(!reject.matches(&data[3], &tokens));
        assert_eq!(
            reject.check(&tokens),
            Err(FilterError::UnknownKey {
                key: "id".into(),
                position: 14
            })
        );
    }

    #[test]
    fn test_string_maps() {
        let registry = SchemaRegistry::dashboard();
        let data: Vec<HashMap<String, String>> = vec![
            HashMap::from([("score".to_string(), "40".to_string())]),
            HashMap::from([("score".to_string(), "60".to_string())]),
        ];
        let evaluator = Evaluator::new(&registry, MapAccessor);
        let kept = evaluator.apply(&data, &parse("score:>50"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0]["score"], "60");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let registry = SchemaRegistry::dashboard();
        let data: Vec<Value> = (0..2500)
            .map(|i| json!({"id": i, "score": i % 100}))
            .collect();
        let evaluator = Evaluator::new(&registry, JsonAccessor::new());
        let tokens = parse("score:>=90");
        let parallel = evaluator.apply_parallel(&data, &tokens);
        assert_eq!(parallel.len(), 250);
        assert_eq!(ids(&parallel), ids(&evaluator.apply(&data, &tokens)));
    }

    #[test]
    fn test_key_case_does_not_matter() {
        assert_eq!(run("STATUS:active"), vec![1, 4]);
        assert_eq!(run("Score:>80 Created-By:ana"), Vec::<i64>::new());
        assert_eq!(run("Created-By:ana"), vec![1, 3]);
    }

    #[test]
    fn test_declared_key_names_the_row_field() {
        let registry = SchemaRegistry::from_json(
            r#"{"commands": {"createdBy": {"type": "string"}, "Score": {"type": "numeric"}}}"#,
        )
        .unwrap();
        let data = vec![
            json!({"id": 1, "createdBy": "ana", "Score": 10}),
            json!({"id": 2, "createdBy": "bo", "Score": 90}),
        ];
        let evaluator = Evaluator::new(&registry, JsonAccessor::new());
        assert_eq!(ids(&evaluator.apply(&data, &parse("createdby:ana"))), vec![1]);
        assert_eq!(ids(&evaluator.apply(&data, &parse("CREATEDBY:bo score:>50"))), vec![2]);
    }

    #[test]
    fn test_field_map_is_case_insensitive() {
        let map: FieldMap = [("Created-By", "createdBy")].into_iter().collect();
        assert_eq!(map.resolve("created-by"), "createdBy");
        assert_eq!(map.resolve("CREATED-BY"), "createdBy");
        assert_eq!(map.resolve("owner"), "owner");
    }
}

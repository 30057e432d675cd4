//! Autocomplete engine

use super::types::{Insertion, Suggestion};
use crate::context::{clamp_cursor, parse_context};
use crate::filter::Operator;
use crate::schema::{CommandSchema, CommandType, SchemaRegistry};
use chrono::{Local, NaiveDate};

/// Example literals offered after a numeric operator
const NUMERIC_EXAMPLES: [&str; 3] = ["0", "10", "100"];

/// Cursor-aware suggestion engine over a schema registry
#[derive(Debug, Clone)]
pub struct Autocomplete<'r> {
    registry: &'r SchemaRegistry,
    today: Option<NaiveDate>,
}

impl<'r> Autocomplete<'r> {
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            today: None,
        }
    }

    /// Pin the date offered for date keys (defaults to the local date)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Suggestions for the word left of `cursor`
    pub fn suggest(&self, text: &str, cursor: usize) -> Vec<Suggestion> {
        let ctx = parse_context(text, cursor);
        if ctx.is_key_position {
            return self.suggest_keys(ctx.current_word);
        }

        let schema = ctx
            .governing_key
            .and_then(|key| self.registry.get_schema(key));
        match schema {
            Some(schema) => self.suggest_values(schema, ctx.current_word),
            None => Vec::new(),
        }
    }

    /// Accept `suggestion` at `cursor`
    pub fn complete(&self, text: &str, cursor: usize, suggestion: &Suggestion) -> Insertion {
        apply_insertion(text, cursor, &suggestion.insert_text)
    }

    fn suggest_keys(&self, prefix: &str) -> Vec<Suggestion> {
        let prefix = prefix.to_lowercase();
        self.registry
            .iter()
            .filter(|(key, _)| key.to_lowercase().starts_with(&prefix))
            .map(|(key, schema)| Suggestion::key(key, schema))
            .collect()
    }

    fn suggest_values(&self, schema: &CommandSchema, typed: &str) -> Vec<Suggestion> {
        match schema.kind {
            CommandType::Enum | CommandType::Boolean => {
                let typed = typed.to_lowercase();
                schema
                    .value_choices()
                    .iter()
                    .filter(|value| value.to_lowercase().starts_with(&typed))
                    .map(|value| Suggestion::value(value, format!("{value} ")))
                    .collect()
            }
            CommandType::Numeric | CommandType::Date => self.suggest_comparison(schema, typed),
            // Free text: nothing useful to offer
            CommandType::String => Vec::new(),
        }
    }

    /// Operators first, then example literals once an operator is typed
    fn suggest_comparison(&self, schema: &CommandSchema, typed: &str) -> Vec<Suggestion> {
        let operators = schema.operators();
        if !operators.is_empty() {
            let matching: Vec<Suggestion> = operators
                .iter()
                .filter(|op| op.symbol().starts_with(typed))
                .map(|op| Suggestion::operator(*op))
                .collect();
            if typed.is_empty() || !matching.is_empty() {
                return matching;
            }
        }

        let (symbol, rest) = if operators.is_empty() {
            ("", typed)
        } else {
            // Literals only follow an operator
            match Operator::strip_comparison(typed) {
                Some((op, rest)) => (op.symbol(), rest),
                None => return Vec::new(),
            }
        };

        self.examples(schema.kind)
            .into_iter()
            .filter(|example| example.starts_with(rest))
            .map(|example| Suggestion::value(&example, format!("{symbol}{example} ")))
            .collect()
    }

    fn examples(&self, kind: CommandType) -> Vec<String> {
        match kind {
            CommandType::Numeric => NUMERIC_EXAMPLES.iter().map(|s| s.to_string()).collect(),
            CommandType::Date => {
                let today = self.today.unwrap_or_else(|| Local::now().date_naive());
                vec![today.format("%Y-%m-%d").to_string()]
            }
            _ => Vec::new(),
        }
    }
}

/// Replace the current word left of `cursor` with `insert_text`.
///
/// The word boundary is the one [`parse_context`] uses: the whole word in
/// key position, the text after the first colon in value position. Text
/// right of the cursor is kept and the cursor lands after the insertion.
pub fn apply_insertion(text: &str, cursor: usize, insert_text: &str) -> Insertion {
    let cursor = clamp_cursor(text, cursor);
    let start = parse_context(text, cursor).token_start;

    let mut new_text = String::with_capacity(text.len() + insert_text.len());
    new_text.push_str(&text[..start]);
    new_text.push_str(insert_text);
    new_text.push_str(&text[cursor..]);

    Insertion {
        new_text,
        new_cursor: start + insert_text.len(),
    }
}

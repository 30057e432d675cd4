//! End-to-end behaviour of the filter language over the dashboard schema

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sift_core::{
    describe_filters, parse, Autocomplete, Evaluator, FilterToken, HealthDistribution,
    JsonAccessor, Operator, RiskLevel, SchemaRegistry, Summarizer, SuggestionKind,
};

fn dataset() -> Vec<Value> {
    vec![
        json!({"name": "atlas", "status": "active", "owner": "Jane Doe", "score": 82, "health": 91, "revenue": 1200, "region": "emea", "created": "2024-01-15"}),
        json!({"name": "borealis", "status": "watch", "owner": "Omar Haddad", "score": 35, "health": 28, "revenue": 300, "region": "na", "created": "2023-06-01"}),
        json!({"name": "cirrus", "status": "paused", "owner": "jane roe", "score": 55, "health": 64, "revenue": "unknown", "region": "apac", "created": "2024-04-30"}),
        json!({"name": "delta", "status": "active", "owner": "Li Wei", "score": "n/a", "health": 97, "revenue": 5000, "region": "emea", "created": "2022-12-31"}),
        json!({"name": "eos", "status": "watch", "owner": "Sam Jones", "score": 61, "health": 45, "revenue": 800, "region": "latam", "created": "2024-02-29"}),
    ]
}

fn names(rows: &[&Value]) -> Vec<String> {
    rows.iter()
        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_enum_value_completion() {
    let registry = SchemaRegistry::dashboard();
    let suggestions = Autocomplete::new(&registry).suggest("status:ac", 9);

    assert!(suggestions
        .iter()
        .any(|s| s.label == "active" && s.insert_text == "active "));
    assert!(!suggestions.iter().any(|s| s.label == "paused"));
}

#[test]
fn test_numeric_filter_skips_unparseable() {
    let registry = SchemaRegistry::dashboard();
    let rows = vec![
        json!({"score": "40"}),
        json!({"score": "60"}),
        json!({"score": "abc"}),
    ];
    let tokens = vec![FilterToken::new("score", Operator::Gt, "50")];

    let kept = Evaluator::new(&registry, JsonAccessor::new()).apply(&rows, &tokens);
    assert_eq!(kept, vec![&json!({"score": "60"})]);
}

#[test]
fn test_numeric_key_offers_operators_first() {
    let registry = SchemaRegistry::dashboard();
    let suggestions = Autocomplete::new(&registry).suggest("score:", 6);

    let labels: Vec<_> = suggestions.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec![">", "<", "=", "!=", ">=", "<="]);
    assert!(suggestions
        .iter()
        .all(|s| s.kind == SuggestionKind::Operator));
}

#[test]
fn test_describe_filters_sentence() {
    let tokens = vec![
        FilterToken::new("status", Operator::Eq, "active"),
        FilterToken::new("score", Operator::Gt, "50"),
    ];
    assert_eq!(
        describe_filters(&tokens),
        "status equals active AND score greater than 50"
    );
}

#[test]
fn test_health_distribution_bands() {
    let rows: Vec<Value> = [30, 50, 70, 90, 99]
        .into_iter()
        .map(|health| json!({ "health": health }))
        .collect();
    let metrics = Summarizer::new(JsonAccessor::new()).summarize(&rows);

    assert_eq!(
        metrics.health.distribution,
        HealthDistribution {
            critical: 1,
            poor: 1,
            fair: 1,
            good: 1,
            excellent: 1
        }
    );
}

#[test]
fn test_summarize_empty_is_low_risk() {
    let rows: Vec<Value> = Vec::new();
    let metrics = Summarizer::new(JsonAccessor::new()).summarize(&rows);
    assert_eq!(metrics.count, 0);
    assert_eq!(metrics.risk_level, RiskLevel::Low);
    assert_eq!(metrics.revenue.total, 0.0);
}

#[test]
fn test_schema_lookup_agrees_with_key_validity() {
    let registry = SchemaRegistry::dashboard();
    let probes = ["status", "STATUS", "created-by", "created_by", "", " ", "score:", "health"];
    for key in probes {
        assert_eq!(
            registry.get_schema(key).is_some(),
            registry.is_valid_key(key),
            "{key}"
        );
    }
}

#[test]
fn test_key_suggestions_share_typed_prefix() {
    let registry = SchemaRegistry::dashboard();
    let engine = Autocomplete::new(&registry);
    for prefix in ["", "s", "S", "st", "cr", "CREATED-", "re", "x"] {
        for suggestion in engine.suggest(prefix, prefix.len()) {
            assert_eq!(suggestion.kind, SuggestionKind::Key);
            assert!(
                suggestion
                    .label
                    .to_lowercase()
                    .starts_with(&prefix.to_lowercase()),
                "{prefix} -> {}",
                suggestion.label
            );
        }
    }
}

#[test]
fn test_apply_is_idempotent() {
    let registry = SchemaRegistry::dashboard();
    let evaluator = Evaluator::new(&registry, JsonAccessor::new());
    let rows = dataset();

    for input in [
        "status:active",
        "owner:jane score:>50",
        "health:<50 region!=na",
        "created:>2024-01-01",
        "",
    ] {
        let tokens = parse(input);
        let once = evaluator.apply(&rows, &tokens);
        let twice = evaluator.apply(once.iter().copied(), &tokens);
        assert_eq!(once, twice, "{input}");
    }
}

#[test]
fn test_more_tokens_never_widen_result() {
    let registry = SchemaRegistry::dashboard();
    let evaluator = Evaluator::new(&registry, JsonAccessor::new());
    let rows = dataset();

    let pairs = [
        ("status:active", "health:>95"),
        ("owner:jane", "status:paused"),
        ("score:>=50", "revenue:<1000"),
        ("region:emea", "bogus:x"),
    ];
    for (first, second) in pairs {
        let t1 = parse(first);
        let mut both = t1.clone();
        both.extend(parse(second));
        assert!(
            evaluator.apply(&rows, &both).len() <= evaluator.apply(&rows, &t1).len(),
            "{first} + {second}"
        );
    }
}

#[test]
fn test_filter_then_summarize() {
    let registry = SchemaRegistry::dashboard();
    let rows = dataset();
    let kept = Evaluator::new(&registry, JsonAccessor::new()).apply(&rows, &parse("status:watch"));
    assert_eq!(names(&kept), vec!["borealis", "eos"]);

    let metrics = Summarizer::new(JsonAccessor::new()).summarize(kept);
    assert_eq!(metrics.count, 2);
    assert_eq!(metrics.revenue.total, 1100.0);
    // 0.5 * 2 watch + 0.3 * 1 below 40 = 1.3
    assert_eq!(metrics.risk_level, RiskLevel::Medium);
    assert_eq!(metrics.status_distribution.get("watch"), Some(&2));
}

#[test]
fn test_live_typing_keeps_previous_result() {
    let registry = SchemaRegistry::dashboard();
    let evaluator = Evaluator::new(&registry, JsonAccessor::new());
    let rows = dataset();

    let settled = names(&evaluator.apply(&rows, &parse("region:emea")));
    for partial in ["region:emea s", "region:emea score", "region:emea score:", "region:emea score:>"] {
        assert_eq!(names(&evaluator.apply(&rows, &parse(partial))), settled, "{partial}");
    }
}

#[test]
fn test_quoted_owner_search() {
    let registry = SchemaRegistry::dashboard();
    let rows = dataset();
    let kept = Evaluator::new(&registry, JsonAccessor::new())
        .apply(&rows, &parse(r#"owner:"jane d""#));
    assert_eq!(names(&kept), vec!["atlas"]);
}

#[test]
fn test_chained_completion_builds_expression() {
    let registry = SchemaRegistry::dashboard();
    let engine = Autocomplete::new(&registry);

    let mut text = String::new();
    let mut cursor = 0;
    for (typed, pick) in [("reg", "region"), ("e", "emea"), ("hea", "health"), ("", ">=")] {
        text.push_str(typed);
        cursor += typed.len();
        let suggestion = engine
            .suggest(&text, cursor)
            .into_iter()
            .find(|s| s.label == pick)
            .unwrap_or_else(|| panic!("no suggestion {pick} for {text:?}"));
        let next = engine.complete(&text, cursor, &suggestion);
        text = next.new_text;
        cursor = next.new_cursor;
    }

    assert_eq!(text, "region:emea health:>=");
    assert_eq!(cursor, text.len());
}

#[test]
fn test_key_case_is_irrelevant_end_to_end() {
    let registry = SchemaRegistry::dashboard();
    let rows = dataset();
    let tokens = parse("STATUS:active Region:emea");
    assert!(tokens.iter().all(|t| registry.is_valid_key(&t.key)));
    assert!(sift_core::diagnose(&registry, &tokens).is_empty());

    let kept = Evaluator::new(&registry, JsonAccessor::new()).apply(&rows, &tokens);
    assert_eq!(names(&kept), vec!["atlas", "delta"]);
}

#[test]
fn test_camel_case_schema_key_completes_and_matches() {
    let registry = SchemaRegistry::from_json(
        r#"{"commands": {"createdBy": {"type": "string", "description": "Author"}}}"#,
    )
    .unwrap();
    let engine = Autocomplete::new(&registry);

    let key = engine.suggest("crea", 4).remove(0);
    let step = engine.complete("crea", 4, &key);
    let text = format!("{}ana", step.new_text);
    assert_eq!(text, "createdBy:ana");

    let rows = vec![
        json!({"name": "one", "createdBy": "ana"}),
        json!({"name": "two", "createdBy": "bo"}),
    ];
    let kept = Evaluator::new(&registry, JsonAccessor::new()).apply(&rows, &parse(&text));
    assert_eq!(names(&kept), vec!["one"]);
}

#[test]
fn test_tab_separated_words_agree_with_tokenizer() {
    let registry = SchemaRegistry::dashboard();
    let text = "status:active\tsco";
    assert_eq!(parse(text).len(), 1);

    let suggestions = Autocomplete::new(&registry).suggest(text, text.len());
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].label, "score");
    assert_eq!(suggestions[0].kind, SuggestionKind::Key);
}

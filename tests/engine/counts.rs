//! Integration tests for count rules
//!
//! Tests unordered `Npos` rules compiled from JSON.

use fql_engine::{EngineConfig, QueryEngine};
use fql_foundation::TokenSequence;

fn engine(npos: &str) -> QueryEngine {
    let json = format!(r#"[[{{"Npos": {npos}}}]]"#);
    QueryEngine::from_json(&json, EngineConfig::default()).unwrap()
}

fn matches(engine: &QueryEngine, tokens: &[&str]) -> bool {
    engine.evaluate_tokens(&TokenSequence::from_rendered(tokens)) == vec![0]
}

#[test]
fn ranges_are_inclusive() {
    let e = engine(r#"[{"resource": "das", "feature": "TM", "count": "{2,3}"}]"#);
    assert!(!matches(&e, &["TM@das"]));
    assert!(matches(&e, &["TM@das", "TM@das"]));
    assert!(matches(&e, &["TM@das", "CheW@pfam", "TM@das", "TM@das"]));
    assert!(!matches(&e, &["TM@das", "TM@das", "TM@das", "TM@das"]));
}

#[test]
fn upper_bound_only() {
    let e = engine(r#"[{"resource": "das", "feature": "TM", "count": "{,1}"}]"#);
    assert!(matches(&e, &[]));
    assert!(matches(&e, &["TM@das"]));
    assert!(!matches(&e, &["TM@das", "TM@das"]));
}

#[test]
fn constraints_are_anded() {
    let e = engine(
        r#"[
            {"resource": "pfam", "feature": "CheW"},
            {"resource": "pfam", "feature": "HATPase_c", "count": "{0}"}
        ]"#,
    );
    assert!(matches(&e, &["CheW@pfam", "CheA@pfam"]));
    assert!(!matches(&e, &["CheW@pfam", "HATPase_c@pfam"]));
    assert!(!matches(&e, &["CheA@pfam"]));
}

#[test]
fn resource_is_part_of_the_pattern() {
    let e = engine(r#"[{"resource": "pfam", "feature": "TM"}]"#);
    assert!(!matches(&e, &["TM@das"]));
}

#[test]
fn occurrences_are_substrings_of_the_rendering() {
    // `CheW@pfam` also occurs inside `MyCheW@pfam`.
    let e = engine(r#"[{"resource": "pfam", "feature": "CheW", "count": "{2}"}]"#);
    assert!(matches(&e, &["CheW@pfam", "MyCheW@pfam"]));
}

#[test]
fn meta_entries_are_dropped_from_counts() {
    let e = engine(
        r#"[
            {"resource": "fql", "feature": "^"},
            {"resource": "pfam", "feature": "CheW"}
        ]"#,
    );
    assert!(matches(&e, &["TM@das", "CheW@pfam"]));
}

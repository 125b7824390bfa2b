//! Integration tests for positional rules
//!
//! Tests ordered `pos` rules compiled from JSON.

use fql_engine::{EngineConfig, QueryEngine};
use fql_foundation::TokenSequence;

fn engine(pos: &str) -> QueryEngine {
    let json = format!(r#"[[{{"pos": {pos}}}]]"#);
    QueryEngine::from_json(&json, EngineConfig::default()).unwrap()
}

fn matches(engine: &QueryEngine, tokens: &[&str]) -> bool {
    engine.evaluate_tokens(&TokenSequence::from_rendered(tokens)) == vec![0]
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn chemoreceptor_architecture() {
    let e = engine(
        r#"[
            {"resource": "das", "feature": "TM", "count": "{2}"},
            {"resource": "pfam", "feature": "HAMP"},
            {"resource": "pfam", "feature": "MCPsignal"}
        ]"#,
    );
    assert!(matches(
        &e,
        &["Cache_2@pfam", "TM@das", "TM@das", "HAMP@pfam", "MCPsignal@pfam"]
    ));
    assert!(!matches(&e, &["TM@das", "HAMP@pfam", "MCPsignal@pfam"]));
    assert!(!matches(&e, &["TM@das", "TM@das", "MCPsignal@pfam", "HAMP@pfam"]));
}

#[test]
fn positions_must_be_contiguous() {
    let e = engine(
        r#"[
            {"resource": "pfam", "feature": "CheW"},
            {"resource": "pfam", "feature": "CheA"}
        ]"#,
    );
    assert!(matches(&e, &["CheW@pfam", "CheA@pfam"]));
    assert!(!matches(&e, &["CheW@pfam", "PAS@pfam", "CheA@pfam"]));
}

// =============================================================================
// Anchors
// =============================================================================

#[test]
fn end_anchor_requires_the_final_token() {
    let e = engine(
        r#"[
            {"resource": "pfam", "feature": "CheW"},
            {"resource": "fql", "feature": "$"}
        ]"#,
    );
    assert!(matches(&e, &["TM@das", "CheW@pfam"]));
    assert!(!matches(&e, &["CheW@pfam", "TM@das"]));
}

#[test]
fn both_anchors_cap_unbounded_counts() {
    let anchored = engine(
        r#"[
            {"resource": "fql", "feature": "^"},
            {"resource": "pfam", "feature": "CheW"},
            {"resource": "fql", "feature": "$"}
        ]"#,
    );
    assert!(matches(&anchored, &["CheW@pfam"]));
    assert!(!matches(&anchored, &["CheW@pfam", "CheW@pfam"]));

    let start_only = engine(
        r#"[
            {"resource": "fql", "feature": "^"},
            {"resource": "pfam", "feature": "CheW"}
        ]"#,
    );
    assert!(matches(&start_only, &["CheW@pfam", "CheW@pfam"]));
}

// =============================================================================
// Wildcards
// =============================================================================

#[test]
fn wildcard_truncation_limits_what_it_absorbs() {
    let e = engine(
        r#"[
            {"resource": "fql", "feature": "^"},
            {"resource": "pfam", "feature": ".*", "count": "{1,2}"},
            {"resource": "pfam", "feature": "CheW"},
            {"resource": "fql", "feature": "$"}
        ]"#,
    );
    assert!(matches(&e, &["TM@das", "HAMP@pfam", "CheW@pfam"]));
    assert!(!matches(&e, &["TM@das", "HAMP@pfam", "PAS@pfam", "CheW@pfam"]));
}

#[test]
fn wildcard_hands_shared_tokens_to_the_next_position() {
    let e = engine(
        r#"[
            {"resource": "pfam", "feature": ".*"},
            {"resource": "pfam", "feature": "CheW", "count": "{2}"}
        ]"#,
    );
    assert!(matches(&e, &["TM@das", "HAMP@pfam", "CheW@pfam", "CheW@pfam"]));
}

// =============================================================================
// AND-groups
// =============================================================================

#[test]
fn group_intersects_its_instructions() {
    let e = engine(
        r#"[
            [{"resource": "pfam", "feature": ".*", "count": "{1,2}"},
             {"resource": "pfam", "feature": "CheW"}],
            {"resource": "pfam", "feature": "CheA"}
        ]"#,
    );
    assert!(matches(&e, &["CheW@pfam", "CheW@pfam", "CheA@pfam"]));
    assert!(!matches(&e, &["CheW@pfam", "CheW@pfam", "CheW@pfam", "CheA@pfam"]));
}

#[test]
fn negative_instruction_in_a_group_is_not_checked() {
    let e = engine(
        r#"[
            [{"resource": "pfam", "feature": "CheW"},
             {"resource": "pfam", "feature": "CheA", "count": "{0}"}]
        ]"#,
    );
    assert!(matches(&e, &["CheW@pfam"]));
    assert!(matches(&e, &["CheA@pfam", "CheW@pfam"]));
}

#[test]
fn all_negative_position_never_matches() {
    let e = engine(r#"[{"resource": "pfam", "feature": "CheA", "count": "{0}"}]"#);
    assert!(!matches(&e, &["CheW@pfam"]));
    assert!(!matches(&e, &[]));
}

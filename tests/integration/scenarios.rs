//! End-to-end matching scenarios
//!
//! Rule text in, matched set indices out.

use fql::engine::{EngineConfig, QueryEngine};
use fql::foundation::{Annotations, ErrorKind, TokenSequence};

fn engine(json: &str) -> QueryEngine {
    QueryEngine::from_json(json, EngineConfig::default()).unwrap()
}

fn seq(tokens: &[&str]) -> TokenSequence {
    TokenSequence::from_rendered(tokens)
}

#[test]
fn exact_count_rule() {
    let e = engine(r#"[[{"Npos": [{"resource": "pfam", "feature": "CheW", "count": "{1}"}]}]]"#);
    assert!(e.evaluate_tokens(&seq(&["CheW@pfam", "CheW@pfam"])).is_empty());
    assert_eq!(
        e.evaluate_tokens(&seq(&["CheW@pfam", "Response_reg@pfam"])),
        vec![0]
    );
}

#[test]
fn anchored_exact_run() {
    let e = engine(
        r#"[[{"pos": [
            {"resource": "fql", "feature": "^"},
            {"resource": "pfam", "feature": "CheW", "count": "{2}"}
        ]}]]"#,
    );
    assert_eq!(e.evaluate_tokens(&seq(&["CheW@pfam", "CheW@pfam"])), vec![0]);
    // The run claims all three CheW, which exceeds `{2}`.
    assert!(
        e.evaluate_tokens(&seq(&["CheW@pfam", "CheW@pfam", "CheW@pfam"]))
            .is_empty()
    );
}

#[test]
fn hard_stop_rejects_a_prefix_match() {
    let e = engine(
        r#"[[{"pos": [
            {"resource": "fql", "feature": "^"},
            {"resource": "das", "feature": "TM", "count": "{1}"},
            {"resource": "pfam", "feature": "Cache_2", "count": "{1}"},
            {"resource": "fql", "feature": "$"}
        ]}]]"#,
    );
    let tokens = seq(&[
        "TM@das",
        "Cache_2@pfam",
        "Cache_1@pfam",
        "TM@das",
        "HAMP@pfam",
        "MCPsignal@pfam",
    ]);
    assert!(e.evaluate_tokens(&tokens).is_empty());
    assert_eq!(e.evaluate_tokens(&seq(&["TM@das", "Cache_2@pfam"])), vec![0]);
}

#[test]
fn missing_fields_are_named() {
    let err = QueryEngine::from_json(
        r#"[[{"pos": [{"resource": "pfam"}]}]]"#,
        EngineConfig::default(),
    )
    .unwrap_err();
    match err.kind {
        ErrorKind::InvalidRule { message, raw } => {
            assert!(message.contains("feature"));
            assert_eq!(raw, r#"{"resource":"pfam"}"#);
        }
        other => panic!("expected InvalidRule, got {other:?}"),
    }

    let err = QueryEngine::from_json(
        r#"[[{"Npos": [{"count": "{1}"}]}]]"#,
        EngineConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("resource and feature"));
}

#[test]
fn chemotaxis_classification() {
    // Three independent sets: a chemoreceptor, a CheW-only adaptor, and a
    // histidine kinase. Each protein is reported against every set.
    let e = engine(
        r#"[
            [{"pos": [
                {"resource": "das", "feature": "TM", "count": "{2}"},
                {"resource": "pfam", "feature": "HAMP"},
                {"resource": "pfam", "feature": "MCPsignal"}
            ]}],
            [{"pos": [
                {"resource": "fql", "feature": "^"},
                {"resource": "pfam", "feature": "CheW"},
                {"resource": "fql", "feature": "$"}
            ]}],
            [
                {"Npos": [{"resource": "pfam", "feature": "HATPase_c"}, {"resource": "pfam", "feature": "CheA"}]},
                {"Npos": [{"resource": "pfam", "feature": "HATPase_c"}, {"resource": "pfam", "feature": "CheW"}]}
            ]
        ]"#,
    );
    assert_eq!(e.required_resources(), vec!["das", "pfam"]);

    let receptor = Annotations::new()
        .with_hit("pfam", 20, "Cache_2")
        .with_hit("das", 40, "TM")
        .with_hit("das", 190, "TM")
        .with_hit("pfam", 215, "HAMP")
        .with_hit("pfam", 300, "MCPsignal");
    let adaptor = Annotations::new().with_hit("pfam", 20, "CheW");
    let kinase = Annotations::new()
        .with_hit("pfam", 5, "HPt")
        .with_hit("pfam", 350, "HATPase_c")
        .with_hit("pfam", 500, "CheW");
    let unrelated = Annotations::new().with_hit("pfam", 5, "PAS");

    assert_eq!(
        e.evaluate_batch([&receptor, &adaptor, &kinase, &unrelated]),
        vec![vec![0], vec![1], vec![2], vec![]]
    );
}

#[test]
fn unannotated_item_matches_nothing_positional() {
    let e = engine(
        r#"[
            [{"pos": [{"resource": "pfam", "feature": ".*"}]}],
            [{"Npos": [{"resource": "pfam", "feature": "CheW", "count": "{0}"}]}]
        ]"#,
    );
    assert_eq!(e.evaluate(&Annotations::new()), vec![1]);
}

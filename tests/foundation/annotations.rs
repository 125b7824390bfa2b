//! Integration tests for the annotation boundary
//!
//! Tests token extraction from per-resource hits.

use fql_foundation::{Annotations, FeatureSource, Hit, TokenSequence};

fn rendered(tokens: &TokenSequence) -> Vec<String> {
    tokens.iter().map(ToString::to_string).collect()
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn extraction_interleaves_resources_by_start() {
    let item = Annotations::new()
        .with_hit("pfam", 120, "HAMP")
        .with_hit("das", 10, "TM")
        .with_hit("pfam", 300, "MCPsignal")
        .with_hit("das", 90, "TM");

    let tokens = TokenSequence::extract(&item, ["das", "pfam"]);
    assert_eq!(
        rendered(&tokens),
        vec!["TM@das", "TM@das", "HAMP@pfam", "MCPsignal@pfam"]
    );
}

#[test]
fn extraction_only_reads_requested_resources() {
    let item = Annotations::new()
        .with_hit("pfam", 1, "CheW")
        .with_hit("das", 2, "TM");

    let tokens = TokenSequence::extract(&item, ["pfam"]);
    assert_eq!(rendered(&tokens), vec!["CheW@pfam"]);
}

#[test]
fn missing_resource_yields_no_tokens() {
    let item = Annotations::new().with_hit("pfam", 1, "CheW");
    let tokens = TokenSequence::extract(&item, ["pfam", "segmasker"]);
    assert_eq!(tokens.len(), 1);

    let empty = TokenSequence::extract(&Annotations::new(), ["pfam"]);
    assert!(empty.is_empty());
}

#[test]
fn equal_starts_keep_resource_order() {
    let item = Annotations::new()
        .with_hit("pfam", 5, "CheW")
        .with_hit("das", 5, "TM");

    let tokens = TokenSequence::extract(&item, ["das", "pfam"]);
    assert_eq!(rendered(&tokens), vec!["TM@das", "CheW@pfam"]);

    let tokens = TokenSequence::extract(&item, ["pfam", "das"]);
    assert_eq!(rendered(&tokens), vec!["CheW@pfam", "TM@das"]);
}

#[test]
fn concatenation_has_no_separator() {
    let item = Annotations::new()
        .with_hit("pfam", 1, "CheW")
        .with_hit("pfam", 2, "CheA");
    let tokens = TokenSequence::extract(&item, ["pfam"]);
    assert_eq!(tokens.concatenated(), "CheW@pfamCheA@pfam");
}

// =============================================================================
// Custom Sources
// =============================================================================

struct SingleResource {
    hits: Vec<Hit>,
}

impl FeatureSource for SingleResource {
    fn hits(&self, resource: &str) -> Option<&[Hit]> {
        (resource == "pfam").then_some(self.hits.as_slice())
    }
}

#[test]
fn any_feature_source_can_be_extracted() {
    let source = SingleResource {
        hits: vec![Hit::new(40, "CheA"), Hit::new(20, "CheW")],
    };
    let tokens = TokenSequence::extract(&source, ["pfam", "das"]);
    assert_eq!(rendered(&tokens), vec!["CheW@pfam", "CheA@pfam"]);
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn annotations_deserialize_from_resource_map() {
    let item: Annotations = serde_json::from_str(
        r#"{
            "pfam": [{"start": 200, "name": "CheW"}, {"start": 15, "name": "CheA"}],
            "das": [{"start": 100, "name": "TM"}]
        }"#,
    )
    .unwrap();

    assert_eq!(item.resources().collect::<Vec<_>>(), vec!["das", "pfam"]);
    let tokens = TokenSequence::extract(&item, item.resources());
    assert_eq!(rendered(&tokens), vec!["CheA@pfam", "TM@das", "CheW@pfam"]);
}

//! The feature extraction boundary.
//!
//! Annotation tools (domain scanners, transmembrane predictors, ...) run
//! outside this crate. They hand over, per protein, a map from resource
//! name to raw hits. This module turns those hits into a [`TokenSequence`].

use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::token::{FeatureToken, TokenSequence};

/// One raw annotation hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hit {
    /// Start coordinate on the protein sequence.
    pub start: u64,
    /// Feature (domain) name.
    pub name: Arc<str>,
}

impl Hit {
    /// Creates a hit.
    #[must_use]
    pub fn new(start: u64, name: impl Into<Arc<str>>) -> Self {
        Self {
            start,
            name: name.into(),
        }
    }
}

/// Anything that can supply annotation hits for one protein.
pub trait FeatureSource {
    /// Returns the hits produced by `resource`, or `None` if the resource
    /// has no data for this protein.
    fn hits(&self, resource: &str) -> Option<&[Hit]>;
}

/// Annotation hits for one protein, keyed by resource name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Annotations {
    by_resource: BTreeMap<String, Vec<Hit>>,
}

impl Annotations {
    /// Creates an empty annotation map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hit for `resource`.
    pub fn insert(&mut self, resource: impl Into<String>, hit: Hit) {
        self.by_resource.entry(resource.into()).or_default().push(hit);
    }

    /// Builder form of [`Annotations::insert`].
    #[must_use]
    pub fn with_hit(mut self, resource: impl Into<String>, start: u64, name: &str) -> Self {
        self.insert(resource, Hit::new(start, name));
        self
    }

    /// Returns the resource names that have hits.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.by_resource.keys().map(String::as_str)
    }
}

impl FeatureSource for Annotations {
    fn hits(&self, resource: &str) -> Option<&[Hit]> {
        self.by_resource.get(resource).map(Vec::as_slice)
    }
}

impl<S: FeatureSource + ?Sized> FeatureSource for &S {
    fn hits(&self, resource: &str) -> Option<&[Hit]> {
        (**self).hits(resource)
    }
}

impl TokenSequence {
    /// Extracts the tokens of `resources` from `source`, ordered by start
    /// coordinate.
    ///
    /// The sort is stable: hits with equal starts keep the order of
    /// `resources`, then their order within the resource. A resource with
    /// no hits contributes no tokens.
    pub fn extract<'r, S, I>(source: &S, resources: I) -> Self
    where
        S: FeatureSource + ?Sized,
        I: IntoIterator<Item = &'r str>,
    {
        let mut placed: Vec<(u64, FeatureToken)> = Vec::new();
        for resource in resources {
            let Some(hits) = source.hits(resource) else {
                continue;
            };
            let resource: Arc<str> = Arc::from(resource);
            placed.extend(hits.iter().map(|hit| {
                (
                    hit.start,
                    FeatureToken::new(Arc::clone(&hit.name), Arc::clone(&resource)),
                )
            }));
        }
        placed.sort_by_key(|(start, _)| *start);
        placed.into_iter().map(|(_, token)| token).collect()
    }
}

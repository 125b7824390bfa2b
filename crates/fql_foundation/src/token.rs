//! Feature tokens: the unit the matchers scan.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One annotated feature hit, rendered as `name@resource`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureToken {
    /// Feature (domain) name, e.g. `CheW`.
    pub name: Arc<str>,
    /// Resource that produced the hit, e.g. `pfam`.
    pub resource: Arc<str>,
}

impl FeatureToken {
    /// Creates a token.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, resource: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
        }
    }

    /// Parses the rendered `name@resource` form.
    ///
    /// Splits at the last `@`, so names may themselves contain `@`.
    /// Returns `None` if there is no `@`.
    #[must_use]
    pub fn from_rendered(rendered: &str) -> Option<Self> {
        let (name, resource) = rendered.rsplit_once('@')?;
        Some(Self::new(name, resource))
    }

    /// Returns true if this token renders to exactly `name@resource`.
    #[must_use]
    pub fn is(&self, name: &str, resource: &str) -> bool {
        &*self.name == name && &*self.resource == resource
    }
}

impl fmt::Display for FeatureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.resource)
    }
}

/// Ordered feature tokens of exactly one protein.
///
/// Read-only input to every evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenSequence {
    tokens: Vec<FeatureToken>,
}

impl TokenSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence from rendered `name@resource` strings.
    ///
    /// Strings without an `@` are skipped.
    #[must_use]
    pub fn from_rendered<S: AsRef<str>>(rendered: &[S]) -> Self {
        rendered
            .iter()
            .filter_map(|s| FeatureToken::from_rendered(s.as_ref()))
            .collect()
    }

    /// Returns the number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Gets a token by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FeatureToken> {
        self.tokens.get(index)
    }

    /// Returns an iterator over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, FeatureToken> {
        self.tokens.iter()
    }

    /// Returns the tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[FeatureToken] {
        &self.tokens
    }

    /// Renders every token and concatenates them with no separator.
    ///
    /// This is the haystack count constraints search in.
    #[must_use]
    pub fn concatenated(&self) -> String {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}

impl Index<usize> for TokenSequence {
    type Output = FeatureToken;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl FromIterator<FeatureToken> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = FeatureToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<FeatureToken>> for TokenSequence {
    fn from(tokens: Vec<FeatureToken>) -> Self {
        Self { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a FeatureToken;
    type IntoIter = std::slice::Iter<'a, FeatureToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{token}")?;
        }
        write!(f, "]")
    }
}

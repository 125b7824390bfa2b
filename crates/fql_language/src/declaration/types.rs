//! Declaration type definitions.
//!
//! Contains the typed rule structures extracted from raw JSON.

/// Resource name reserved for meta tokens such as anchors.
pub const META_RESOURCE: &str = "fql";

/// Feature of the start anchor meta token.
pub const START_ANCHOR: &str = "^";

/// Feature of the end anchor meta token.
pub const END_ANCHOR: &str = "$";

// =============================================================================
// Entries
// =============================================================================

/// A feature entry: `{"resource": "pfam", "feature": "CheW", "count": "{2}"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureDecl {
    /// Resource that produces the feature.
    pub resource: String,
    /// Feature name, or a `.*` wildcard.
    pub feature: String,
    /// Count string as written, if any.
    pub count: Option<String>,
    /// The raw JSON object, kept for diagnostics.
    pub raw: String,
}

/// One entry of a `pos` or `Npos` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryDecl {
    /// An entry tagged `"resource": "fql"`.
    Meta {
        /// The meta feature (`^`, `$`), if declared.
        feature: Option<String>,
        /// The raw JSON object.
        raw: String,
    },
    /// A regular feature entry.
    Feature(FeatureDecl),
}

impl EntryDecl {
    /// Returns true for `fql` meta entries.
    #[must_use]
    pub fn is_meta(&self) -> bool {
        matches!(self, Self::Meta { .. })
    }

    /// Returns true if this is the meta entry with the given feature.
    #[must_use]
    pub fn is_meta_feature(&self, name: &str) -> bool {
        matches!(self, Self::Meta { feature: Some(f), .. } if f == name)
    }

    /// Returns the raw JSON object.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Meta { raw, .. } => raw,
            Self::Feature(decl) => &decl.raw,
        }
    }
}

// =============================================================================
// Positions and Alternatives
// =============================================================================

/// One slot of a `pos` list: a single entry or an AND-group of entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionDecl {
    /// `{...}`
    Single(EntryDecl),
    /// `[{...}, {...}]`
    Group(Vec<EntryDecl>),
}

impl PositionDecl {
    /// Returns the entries of this slot, treating a single entry as a
    /// one-element group.
    #[must_use]
    pub fn entries(&self) -> &[EntryDecl] {
        match self {
            Self::Single(entry) => std::slice::from_ref(entry),
            Self::Group(entries) => entries,
        }
    }

    /// Returns the entry if this slot is a single entry.
    #[must_use]
    pub fn as_single(&self) -> Option<&EntryDecl> {
        match self {
            Self::Single(entry) => Some(entry),
            Self::Group(_) => None,
        }
    }
}

/// One alternative: `{"pos": [...], "Npos": [...]}`.
///
/// Either half may be absent; an absent half is vacuously satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlternativeDecl {
    /// Ordered positional constraints.
    pub pos: Option<Vec<PositionDecl>>,
    /// Unordered count constraints.
    pub npos: Option<Vec<EntryDecl>>,
}

/// A rule set: alternatives combined with OR.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSetDecl {
    /// The alternatives, in declaration order.
    pub alternatives: Vec<AlternativeDecl>,
}

impl RuleSetDecl {
    /// Creates a rule set from alternatives.
    #[must_use]
    pub fn new(alternatives: Vec<AlternativeDecl>) -> Self {
        Self { alternatives }
    }
}

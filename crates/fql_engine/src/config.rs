//! Configuration for rule compilation and matching.

/// Configuration for the query engine.
///
/// The defaults reproduce the legacy matching behaviour exactly. Each flag
/// opts into a stricter reading of an ambiguous rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Reject misplaced `^`/`$` anchors and unknown `fql` meta entries at
    /// compile time instead of dropping them.
    pub strict_anchors: bool,

    /// Reject a position when no split of the tokens it shares with the
    /// next position satisfies both positions' bounds.
    pub reject_unresolved_boundary: bool,
}

impl EngineConfig {
    /// Creates the legacy configuration (same as `Default`).
    #[must_use]
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Creates a configuration with every strict check enabled.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict_anchors: true,
            reject_unresolved_boundary: true,
        }
    }

    /// Builder method to set strict anchor validation.
    #[must_use]
    pub fn with_strict_anchors(mut self, strict: bool) -> Self {
        self.strict_anchors = strict;
        self
    }

    /// Builder method to set rejection of unresolved shared boundaries.
    #[must_use]
    pub fn with_reject_unresolved_boundary(mut self, reject: bool) -> Self {
        self.reject_unresolved_boundary = reject;
        self
    }
}

//! Quantifier ranges attached to rule instructions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive occurrence range `{min,max}`.
///
/// `max == None` means the range is unbounded above.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountRange {
    /// Minimum number of occurrences.
    pub min: usize,
    /// Maximum number of occurrences, or `None` for unbounded.
    pub max: Option<usize>,
}

impl CountRange {
    /// The range used when a declaration has no count string: `{1,}`.
    pub const DEFAULT: CountRange = CountRange { min: 1, max: None };

    /// Creates a bounded range.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Creates a range with no upper bound.
    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Creates the range `{n,n}`.
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Returns true if `n` lies within the range.
    #[must_use]
    pub const fn contains(self, n: usize) -> bool {
        n >= self.min && self.satisfies_max(n)
    }

    /// Returns true if `n` does not exceed the upper bound.
    #[must_use]
    pub const fn satisfies_max(self, n: usize) -> bool {
        match self.max {
            Some(max) => n <= max,
            None => true,
        }
    }

    /// Returns true for `{0,0}`, the "must be absent" range.
    #[must_use]
    pub const fn is_exact_zero(self) -> bool {
        self.min == 0 && matches!(self.max, Some(0))
    }

    /// Returns true if there is no upper bound.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        self.max.is_none()
    }
}

impl Default for CountRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{{{max}}}"),
            Some(max) => write!(f, "{{{},{max}}}", self.min),
            None => write!(f, "{{{},}}", self.min),
        }
    }
}

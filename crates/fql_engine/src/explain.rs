//! Explanation of why a protein matched or did not match.
//!
//! [`QueryEngine::explain`](crate::QueryEngine::explain) evaluates every
//! alternative of every set without short-circuiting and records the
//! outcome of each half.
//!
//! ```text
//! set 0: matched
//!   alternative 0: pos accepted [[0], [1]], Npos -
//! set 1: no match
//!   alternative 0: pos failed at position 1 [[0], [3]], Npos rejected
//! ```

use std::fmt;

use crate::sequence::PositionalOutcome;

/// Outcome of one alternative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlternativeReport {
    /// Positional half, if the alternative has one.
    pub positional: Option<PositionalOutcome>,
    /// Count half verdict, if the alternative has one.
    pub count: Option<bool>,
}

impl AlternativeReport {
    /// Both present halves accepted.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.positional.as_ref().is_none_or(|p| p.accepted) && self.count.is_none_or(|c| c)
    }
}

/// Outcome of one query set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetReport {
    /// Index of the set in the query.
    pub index: usize,
    /// One report per alternative, in declaration order.
    pub alternatives: Vec<AlternativeReport>,
}

impl SetReport {
    /// Any alternative matched.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.alternatives.iter().any(AlternativeReport::matched)
    }

    /// Index of the first matching alternative.
    #[must_use]
    pub fn first_match(&self) -> Option<usize> {
        self.alternatives.iter().position(AlternativeReport::matched)
    }
}

impl fmt::Display for SetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.matched() { "matched" } else { "no match" };
        writeln!(f, "set {}: {verdict}", self.index)?;
        for (i, alt) in self.alternatives.iter().enumerate() {
            write!(f, "  alternative {i}: pos ")?;
            match &alt.positional {
                None => write!(f, "-")?,
                Some(p) if p.accepted => write!(f, "accepted {:?}", p.positions)?,
                Some(p) => match p.failed_at {
                    Some(at) => write!(f, "failed at position {at} {:?}", p.positions)?,
                    None => write!(f, "failed {:?}", p.positions)?,
                },
            }
            match alt.count {
                None => writeln!(f, ", Npos -")?,
                Some(true) => writeln!(f, ", Npos accepted")?,
                Some(false) => writeln!(f, ", Npos rejected")?,
            }
        }
        Ok(())
    }
}

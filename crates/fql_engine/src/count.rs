//! Unordered occurrence-count (`Npos`) constraints.

use fql_foundation::TokenSequence;

use crate::rule::{CompiledCountRule, CountConstraint};

/// Evaluates count rules against the concatenated rendering of a sequence.
pub struct CountConstraintEvaluator;

impl CountConstraintEvaluator {
    /// Returns true if every constraint of `rule` accepts the number of
    /// times its needle occurs in `haystack`.
    ///
    /// `haystack` is [`TokenSequence::concatenated`]. Occurrences are
    /// counted as non-overlapping substrings, so a needle also counts
    /// inside a longer token that ends with it.
    #[must_use]
    pub fn evaluate(rule: &CompiledCountRule, haystack: &str) -> bool {
        rule.constraints
            .iter()
            .all(|constraint| Self::accepts(constraint, haystack))
    }

    /// Convenience wrapper that renders `tokens` first.
    #[must_use]
    pub fn evaluate_tokens(rule: &CompiledCountRule, tokens: &TokenSequence) -> bool {
        Self::evaluate(rule, &tokens.concatenated())
    }

    /// Number of non-overlapping occurrences of the constraint's needle.
    #[must_use]
    pub fn occurrences(constraint: &CountConstraint, haystack: &str) -> usize {
        haystack.matches(constraint.needle.as_str()).count()
    }

    fn accepts(constraint: &CountConstraint, haystack: &str) -> bool {
        constraint
            .range
            .contains(Self::occurrences(constraint, haystack))
    }
}

//! Chaining the positions of a positional rule.
//!
//! Positions are matched left to right, each starting right after the last
//! token the previous one claimed. When a position's run and its
//! successor's run overlap, the shared ("soft") tokens are split between
//! them: the current position takes the fewest soft tokens that leave both
//! positions within their bounds.

use fql_foundation::TokenSequence;
use log::trace;

use crate::config::EngineConfig;
use crate::position::PositionalInstructionMatcher;
use crate::rule::{CompiledPosition, CompiledPositionalRule};

/// Outcome of evaluating one positional rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionalOutcome {
    /// Whether the rule matched.
    pub accepted: bool,
    /// Committed match indices of every evaluated position. Positions after
    /// a failure are not evaluated and have no entry.
    pub positions: Vec<Vec<usize>>,
    /// Index of the position that failed, if any.
    pub failed_at: Option<usize>,
}

/// Evaluates positional rules.
pub struct SequentialPositionalEvaluator;

impl SequentialPositionalEvaluator {
    /// Returns true if `rule` matches `tokens`.
    #[must_use]
    pub fn matches(
        rule: &CompiledPositionalRule,
        tokens: &TokenSequence,
        config: &EngineConfig,
    ) -> bool {
        Self::evaluate(rule, tokens, config).accepted
    }

    /// Evaluate `rule` against `tokens`, recording per-position matches.
    ///
    /// Evaluation stops at the first position that fails.
    #[must_use]
    pub fn evaluate(
        rule: &CompiledPositionalRule,
        tokens: &TokenSequence,
        config: &EngineConfig,
    ) -> PositionalOutcome {
        let mut outcome = PositionalOutcome::default();
        let mut last_matched: Option<usize> = None;
        let final_position = rule.positions.len().saturating_sub(1);

        for (i, position) in rule.positions.iter().enumerate() {
            let anchored = i == 0 && rule.hard_start;
            let mut current =
                PositionalInstructionMatcher::match_position(tokens, position, last_matched);
            let mut ok = follows(last_matched, &current);

            if let (Some(next), Some(&first)) = (rule.positions.get(i + 1), current.first()) {
                let upcoming = PositionalInstructionMatcher::match_position(tokens, next, Some(first));
                match Self::split_boundary(position, next, &current, &upcoming, anchored) {
                    Some(claimed) => current = claimed,
                    None if config.reject_unresolved_boundary => {
                        trace!("position {i}: no valid split of shared tokens");
                        ok = false;
                    }
                    None => {}
                }
            }

            if !Self::within_bounds(position, &current, anchored) {
                ok = false;
            }
            if current.is_empty() || !follows(last_matched, &current) {
                ok = false;
            }

            last_matched = current.last().copied();
            if i == final_position && rule.hard_stop && last_matched != tokens.len().checked_sub(1)
            {
                ok = false;
            }

            trace!("position {i}: matched {current:?}, ok = {ok}");
            outcome.positions.push(current);
            if !ok {
                outcome.failed_at = Some(i);
                return outcome;
            }
        }

        outcome.accepted = true;
        outcome
    }

    /// Split the tokens shared by `current` and `upcoming`.
    ///
    /// Returns the indices the current position keeps for the smallest
    /// number of shared tokens under which both positions are within
    /// bounds, or `None` if no split works.
    fn split_boundary(
        position: &CompiledPosition,
        next: &CompiledPosition,
        current: &[usize],
        upcoming: &[usize],
        anchored: bool,
    ) -> Option<Vec<usize>> {
        let hard = leading_run(current.iter().copied().filter(|i| !upcoming.contains(i)));
        let soft = leading_run(current.iter().copied().filter(|i| upcoming.contains(i)));
        let next_only = leading_run(upcoming.iter().copied().filter(|i| !current.contains(i)));

        (0..=soft.len()).find_map(|j| {
            let kept: Vec<usize> = hard.iter().chain(&soft[..j]).copied().collect();
            let given: Vec<usize> = soft[j..].iter().chain(&next_only).copied().collect();
            (Self::within_bounds(position, &kept, anchored)
                && Self::within_bounds(next, &given, false))
            .then(|| {
                trace!("split shared tokens {soft:?} at {j}");
                kept
            })
        })
    }

    /// Bound check for one position; the anchored first position must also
    /// start at index 0.
    fn within_bounds(position: &CompiledPosition, indices: &[usize], anchored: bool) -> bool {
        if anchored && indices.first() != Some(&0) {
            return false;
        }
        position.accepts(indices.len())
    }
}

/// True if there is no previous match or `current` starts right after it.
fn follows(last_matched: Option<usize>, current: &[usize]) -> bool {
    last_matched.is_none_or(|last| current.first() == Some(&(last + 1)))
}

/// The maximal contiguous run at the head of an ascending sequence.
fn leading_run(indices: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut run: Vec<usize> = Vec::new();
    for index in indices {
        match run.last() {
            Some(&last) if index != last + 1 => break,
            _ => run.push(index),
        }
    }
    run
}

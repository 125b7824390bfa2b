//! Matching one position of a positional rule.
//!
//! Each instruction claims a single contiguous run of matching tokens. The
//! instructions of a position are then combined with AND by intersecting
//! their runs.

use fql_foundation::TokenSequence;

use crate::rule::{CompiledInstruction, CompiledPosition, Pattern};

/// Finds where a position matches in a token sequence.
pub struct PositionalInstructionMatcher;

impl PositionalInstructionMatcher {
    /// Match every instruction of `position` against the tokens after
    /// `after` (or from the start when `after` is `None`).
    ///
    /// Negative instructions are discarded. The remaining runs are
    /// intersected; with no remaining runs the result is empty.
    #[must_use]
    pub fn match_position(
        tokens: &TokenSequence,
        position: &CompiledPosition,
        after: Option<usize>,
    ) -> Vec<usize> {
        let mut runs = position
            .instructions
            .iter()
            .filter(|instr| !instr.is_negative())
            .map(|instr| Self::match_instruction(tokens, instr, after));

        let Some(first) = runs.next() else {
            return Vec::new();
        };
        runs.fold(first, |acc, run| intersect(&acc, &run))
    }

    /// Collect the first contiguous run of tokens matching `instr`.
    ///
    /// Non-matching tokens are skipped both before and during the run. A
    /// matching token that does not directly follow the run ends the scan.
    /// Wildcard runs are truncated to the instruction's upper bound.
    #[must_use]
    pub fn match_instruction(
        tokens: &TokenSequence,
        instr: &CompiledInstruction,
        after: Option<usize>,
    ) -> Vec<usize> {
        let start = after.map_or(0, |a| a + 1);
        let mut run: Vec<usize> = Vec::new();

        for (index, token) in tokens.iter().enumerate().skip(start) {
            if !instr.pattern.matches(token) {
                continue;
            }
            match run.last() {
                Some(&last) if index != last + 1 => break,
                _ => run.push(index),
            }
        }

        if let (Pattern::Wildcard, Some(max)) = (&instr.pattern, instr.range.max) {
            run.truncate(max);
        }
        run
    }
}

/// Elements of `a` that also appear in `b`, in `a`'s order. Both are sorted.
fn intersect(a: &[usize], b: &[usize]) -> Vec<usize> {
    a.iter()
        .copied()
        .filter(|i| b.binary_search(i).is_ok())
        .collect()
}

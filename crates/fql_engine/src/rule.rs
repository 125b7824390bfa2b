//! Compiled rule structures.
//!
//! Everything here is produced once by the [`RuleCompiler`] and then only
//! read. A compiled [`Query`] can be shared across threads and reused for
//! every protein.

use std::collections::BTreeSet;

use fql_foundation::{CountRange, FeatureToken};

mod compiler;

pub use compiler::RuleCompiler;

// =============================================================================
// Instructions
// =============================================================================

/// What an instruction matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly one `name@resource`.
    Literal(FeatureToken),
    /// Any token (declared with a feature containing `.*`).
    Wildcard,
}

impl Pattern {
    /// Returns true if `token` satisfies this pattern.
    #[must_use]
    pub fn matches(&self, token: &FeatureToken) -> bool {
        match self {
            Self::Literal(literal) => literal == token,
            Self::Wildcard => true,
        }
    }

    /// Returns true for the wildcard pattern.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }
}

/// A pattern with its quantifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledInstruction {
    /// What to match.
    pub pattern: Pattern,
    /// How many contiguous matches are required.
    pub range: CountRange,
}

impl CompiledInstruction {
    /// Creates an instruction.
    #[must_use]
    pub fn new(pattern: Pattern, range: CountRange) -> Self {
        Self { pattern, range }
    }

    /// Negative instructions (`{0}`) express required absence and never
    /// contribute matches to their position.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.range.is_exact_zero()
    }

    /// Returns true if `n` matches satisfy this instruction.
    ///
    /// Wildcards are exempt from the upper bound since their runs are
    /// already truncated to it.
    #[must_use]
    pub fn accepts(&self, n: usize) -> bool {
        n >= self.range.min && (self.pattern.is_wildcard() || self.range.satisfies_max(n))
    }
}

// =============================================================================
// Positional Rules
// =============================================================================

/// One slot of a positional rule: instructions combined with AND over the
/// same region of tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPosition {
    /// Never empty.
    pub instructions: Vec<CompiledInstruction>,
}

impl CompiledPosition {
    /// Creates a position.
    #[must_use]
    pub fn new(instructions: Vec<CompiledInstruction>) -> Self {
        debug_assert!(!instructions.is_empty(), "a position needs an instruction");
        Self { instructions }
    }

    /// Creates a single-instruction position.
    #[must_use]
    pub fn single(instruction: CompiledInstruction) -> Self {
        Self::new(vec![instruction])
    }

    /// Returns true if `n` matched tokens satisfy every non-negative
    /// instruction of this position.
    #[must_use]
    pub fn accepts(&self, n: usize) -> bool {
        self.instructions
            .iter()
            .filter(|instr| !instr.is_negative())
            .all(|instr| instr.accepts(n))
    }
}

/// An ordered (`pos`) rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledPositionalRule {
    /// The first position must match at index 0 (`^`).
    pub hard_start: bool,
    /// The last position must end at the final token (`$`).
    pub hard_stop: bool,
    /// Positions in order.
    pub positions: Vec<CompiledPosition>,
}

// =============================================================================
// Count Rules
// =============================================================================

/// One unordered occurrence constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountConstraint {
    /// The rendered `name@resource` searched for.
    pub needle: String,
    /// Accepted number of occurrences.
    pub range: CountRange,
}

/// An unordered (`Npos`) rule: constraints combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledCountRule {
    /// The constraints, in declaration order.
    pub constraints: Vec<CountConstraint>,
}

// =============================================================================
// Alternatives, Sets, Queries
// =============================================================================

/// One alternative. An absent half is vacuously satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alternative {
    /// Ordered constraints.
    pub positional: Option<CompiledPositionalRule>,
    /// Unordered constraints.
    pub count: Option<CompiledCountRule>,
}

/// Alternatives combined with OR, plus the resources they reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuerySet {
    /// The alternatives. A set with none never matches.
    pub alternatives: Vec<Alternative>,
    /// Resources this set's tokens must be extracted from.
    pub resources: BTreeSet<String>,
}

impl QuerySet {
    /// Returns the resources this set needs, in sorted order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(String::as_str)
    }
}

/// Independently reported query sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    /// The sets, indexed as declared.
    pub sets: Vec<QuerySet>,
}

impl Query {
    /// Returns the union of every set's resources.
    #[must_use]
    pub fn required_resources(&self) -> BTreeSet<&str> {
        self.sets.iter().flat_map(QuerySet::resources).collect()
    }

    /// Returns the number of sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns true if there are no sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

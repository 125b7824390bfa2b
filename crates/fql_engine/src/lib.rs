//! Rule compilation and matching for the Feature Query Language.
//!
//! This crate provides:
//! - [`RuleCompiler`] - Declarations to compiled queries
//! - [`PositionalInstructionMatcher`] - Matching one position
//! - [`SequentialPositionalEvaluator`] - Chaining positions with soft boundaries
//! - [`CountConstraintEvaluator`] - Unordered occurrence counts
//! - [`QueryEngine`] - Evaluating items against every query set
//! - [`EngineConfig`] - Anchor and boundary strictness

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod count;
pub mod explain;
pub mod position;
pub mod query;
pub mod rule;
pub mod sequence;

pub use config::EngineConfig;
pub use count::CountConstraintEvaluator;
pub use explain::{AlternativeReport, SetReport};
pub use position::PositionalInstructionMatcher;
pub use query::QueryEngine;
pub use rule::{
    Alternative, CompiledCountRule, CompiledInstruction, CompiledPosition, CompiledPositionalRule,
    CountConstraint, Pattern, Query, QuerySet, RuleCompiler,
};
pub use sequence::{PositionalOutcome, SequentialPositionalEvaluator};

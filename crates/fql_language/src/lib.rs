//! Rule declarations for the Feature Query Language.
//!
//! This crate provides:
//! - [`declaration`] - Typed rule sets, alternatives, positions and entries,
//!   plus the [`DeclarationAnalyzer`] that extracts them from JSON
//! - [`parse_count`] - The `{n,m}` quantifier parser

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod count;
pub mod declaration;

pub use count::parse_count;
pub use declaration::{
    AlternativeDecl, DeclarationAnalyzer, EntryDecl, FeatureDecl, PositionDecl, RuleSetDecl,
};

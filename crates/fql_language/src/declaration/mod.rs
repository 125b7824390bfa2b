//! Typed rule declarations extracted from raw JSON.
//!
//! This module transforms the JSON rule format (arrays of alternatives with
//! `pos` and `Npos` lists) into typed declaration structures.
//!
//! The flow is: JSON text → `serde_json::Value` → `DeclarationAnalyzer` →
//! [`RuleSetDecl`] → `RuleCompiler`
//!
//! # Module Structure
//!
//! - `types` - All declaration type definitions
//! - `analyzer` - The `DeclarationAnalyzer` implementation

mod analyzer;
mod types;


// Re-export types
pub use types::{
    AlternativeDecl, END_ANCHOR, EntryDecl, FeatureDecl, META_RESOURCE, PositionDecl,
    RuleSetDecl, START_ANCHOR,
};

// Re-export analyzer
pub use analyzer::{DeclarationAnalyzer, NPOS_KEY, POS_KEY};

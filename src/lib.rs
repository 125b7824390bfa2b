//! FQL - Feature Query Language
//!
//! This crate re-exports all layers of the FQL matching engine for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: fql_engine     — Rule compiler, matchers, query engine
//! Layer 1: fql_language   — Rule declarations, count parser
//! Layer 0: fql_foundation — Core types (FeatureToken, CountRange, Error)
//! ```

pub use fql_engine as engine;
pub use fql_foundation as foundation;
pub use fql_language as language;

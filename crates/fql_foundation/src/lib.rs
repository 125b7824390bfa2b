//! Core types for the Feature Query Language.
//!
//! This crate provides:
//! - [`FeatureToken`] and [`TokenSequence`] - The data the matchers scan
//! - [`CountRange`] - Quantifier ranges such as `{1,3}`
//! - [`FeatureSource`], [`Annotations`], [`Hit`] - The annotation boundary
//! - [`Error`] - Compilation error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod annotation;
pub mod error;
pub mod range;
pub mod token;

pub use annotation::{Annotations, FeatureSource, Hit};
pub use error::{CountProblem, Error, ErrorContext, ErrorKind, Result};
pub use range::CountRange;
pub use token::{FeatureToken, TokenSequence};

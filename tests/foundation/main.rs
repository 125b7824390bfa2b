//! Integration tests for Layer 0: Foundation
//!
//! Tests for feature tokens, annotation extraction, and errors.

mod annotations;

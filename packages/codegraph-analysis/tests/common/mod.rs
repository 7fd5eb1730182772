//! Common test utilities for codegraph-analysis
//!
//! Shared program fixtures and statement builders for integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

// Re-export all utilities
pub use builders::*;
pub use fixtures::*;

//! Shared module - Common types used across all features
//!
//! The program model (IR, arena, class hierarchy) consumed by every analysis.

pub mod models;

pub use models::*;

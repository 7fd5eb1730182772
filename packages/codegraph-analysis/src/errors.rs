//! Error types for codegraph-analysis
//!
//! Provides unified error handling across the crate. Resolution failures
//! (no dispatch target, no callee) are never errors; they produce empty
//! results. Only configuration and malformed-input problems surface here.

use crate::config::ConfigError;
use thiserror::Error;

/// Main error type for codegraph-analysis operations
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The program defines no entry method, so nothing is reachable
    #[error("No entry method defined for the program")]
    NoEntryMethod,

    /// A configured entry signature does not name any method
    #[error("Entry method not found: {0}")]
    EntryNotFound(String),

    /// A method without a body was asked for its CFG or facts
    #[error("Method {0} has no body")]
    MissingBody(String),

    /// IR that violates structural invariants (e.g. jump out of range)
    #[error("Malformed IR in {method}: {reason}")]
    MalformedIr { method: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Create a malformed-IR error
    pub fn malformed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedIr {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

//! # Live Variables
//!
//! Backward may-analysis: a variable is live at a point when some path from
//! that point reads it before redefining it.

pub mod infrastructure;

pub use infrastructure::{LiveVariableAnalysis, LiveVars};

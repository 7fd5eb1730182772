//! Application layer for Points-to Analysis
//!
//! - **PointerAnalyzer**: configures and runs the solver
//! - **PointerAnalysisResult**: read-only points-to mapping and call graph

pub mod analyzer;

pub use analyzer::{PointerAnalysisResult, PointerAnalyzer};

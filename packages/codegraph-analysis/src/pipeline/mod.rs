//! Pipeline orchestration
//!
//! Runs the analyses in dependency order on one [`Program`]:
//! call graph → constant propagation → live variables + dead code.
//!
//! [`Program`]: crate::shared::models::Program

pub mod orchestrator;
pub mod result;

pub use orchestrator::AnalysisPipeline;
pub use result::{AnalysisReport, MethodReport};

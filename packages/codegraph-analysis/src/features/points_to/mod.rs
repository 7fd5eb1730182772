//! # Points-to Analysis Module
//!
//! Context-insensitive, inclusion-based pointer analysis that builds the
//! call graph on the fly:
//! - **Pointer Flow Graph**: explicit subset edges between pointers
//! - **Work List**: FIFO of pending `(pointer, objects)` propagations
//! - **Heap models**: allocation-site (default) or type-based objects
//!
//! ## Academic References
//! - Andersen, L. O. "Program Analysis and Specialization for C" (PhD 1994)
//! - Lhoták & Hendren "Scaling Java Points-to Analysis using Spark" (CC 2003)
//!
//! ## Usage
//! ```text
//! use codegraph_analysis::features::points_to::PointerAnalyzer;
//!
//! let result = PointerAnalyzer::default().analyze(&program)?;
//! assert!(result.may_alias(x, y));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for public API
pub use application::{PointerAnalysisResult, PointerAnalyzer};
pub use domain::{AllocSite, Obj, ObjId, Pointer, PointsToSet};
pub use infrastructure::{
    AllocationSiteHeapModel, PointerFlowGraph, PointerId, PtaStats, Solver, TypeBasedHeapModel,
};
pub use ports::HeapModel;

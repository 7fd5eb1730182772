//! Call graph construction
//!
//! Two builders produce the same [`CallGraph`] structure:
//! - the points-to solver (on-the-fly, precise receiver types)
//! - [`ChaBuilder`] (class-hierarchy analysis, declared types only)

pub mod domain;
pub mod infrastructure;

pub use domain::call_graph::{CallEdge, CallGraph, CallSite};
pub use infrastructure::cha_builder::ChaBuilder;

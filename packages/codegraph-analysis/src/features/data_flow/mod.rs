//! # Data-flow Analysis Framework
//!
//! Generic monotone framework: an analysis implements
//! [`DataflowAnalysis`], the graph implements [`Icfg`], and
//! [`DataflowSolver`] computes per-node in/out facts.
//!
//! Constant propagation, live variables and dead-code detection are built
//! on top of it.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{CfgEdgeKind, DataflowResult, IcfgEdge, IcfgEdgeKind, NodeId, NodeKind};
pub use infrastructure::{Cfg, DataflowSolver, ProgramIcfg};
pub use ports::{DataflowAnalysis, Icfg};

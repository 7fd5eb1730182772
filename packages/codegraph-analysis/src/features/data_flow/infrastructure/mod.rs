//! Data-flow infrastructure
//!
//! - **Cfg**: per-method control-flow graph
//! - **ProgramIcfg**: CFGs of reachable methods linked by call/return edges
//! - **DataflowSolver**: forward/backward worklist fixpoint

pub mod cfg;
pub mod icfg;
pub mod solver;

pub use cfg::Cfg;
pub use icfg::ProgramIcfg;
pub use solver::DataflowSolver;

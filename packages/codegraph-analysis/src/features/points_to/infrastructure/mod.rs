//! Infrastructure layer for Points-to Analysis
//!
//! - **PointerFlowGraph**: interned pointers + flow edges (petgraph)
//! - **WorkList**: FIFO of pending propagations
//! - **Solver**: on-the-fly call graph + inclusion-based propagation
//! - **Heap models**: allocation-site and type-based object naming

pub mod heap_model;
pub mod pointer_flow_graph;
pub mod solver;
pub mod work_list;

pub use heap_model::{AllocationSiteHeapModel, TypeBasedHeapModel};
pub use pointer_flow_graph::{PointerFlowGraph, PointerId};
pub use solver::{PtaStats, Solver};
pub use work_list::WorkList;

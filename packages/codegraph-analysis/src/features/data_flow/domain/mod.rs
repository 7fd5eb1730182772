//! Domain models for data-flow analysis

pub mod node;
pub mod result;

pub use node::{CfgEdgeKind, IcfgEdge, IcfgEdgeKind, NodeId, NodeKind};
pub use result::DataflowResult;

//! Domain models for call graphs

pub mod call_graph;

pub use call_graph::{CallEdge, CallGraph, CallSite};

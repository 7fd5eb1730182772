//! Ports (Interfaces) for data-flow analysis
//!
//! - [`Icfg`]: graph the solver walks (a single CFG or the whole ICFG)
//! - [`DataflowAnalysis`]: lattice and transfer functions of one analysis
//!
//! The solver is generic over both, so every concrete analysis is a plain
//! trait implementation.

use crate::features::data_flow::domain::IcfgEdge;
use crate::shared::models::MethodId;
use std::fmt::Debug;
use std::hash::Hash;

/// Interprocedural control-flow graph oracle
pub trait Icfg {
    type Node: Copy + Eq + Hash + Debug;

    /// Methods whose entry (forward) or exit (backward) is a boundary node
    fn entry_methods(&self) -> Vec<MethodId>;

    fn entry_of(&self, method: MethodId) -> Self::Node;

    fn exit_of(&self, method: MethodId) -> Self::Node;

    /// All nodes, in a stable order
    fn nodes(&self) -> &[Self::Node];

    fn in_edges_of(&self, node: Self::Node) -> &[IcfgEdge<Self::Node>];

    fn out_edges_of(&self, node: Self::Node) -> &[IcfgEdge<Self::Node>];

    fn succs_of(&self, node: Self::Node) -> Vec<Self::Node> {
        self.out_edges_of(node).iter().map(|e| e.target).collect()
    }

    fn preds_of(&self, node: Self::Node) -> Vec<Self::Node> {
        self.in_edges_of(node).iter().map(|e| e.source).collect()
    }
}

/// Capabilities a data-flow analysis plugs into the solver
pub trait DataflowAnalysis<N> {
    type Fact: Clone + PartialEq + Debug;

    fn is_forward(&self) -> bool;

    /// Fact at entry (forward) or exit (backward) of entry methods
    fn new_boundary_fact(&self, node: N) -> Self::Fact;

    fn new_initial_fact(&self) -> Self::Fact;

    /// `target ⊓= fact`
    fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact);

    /// Apply the node's transfer function, writing into `output`.
    ///
    /// Returns true if `output` changed.
    fn transfer_node(&self, node: N, input: &Self::Fact, output: &mut Self::Fact) -> bool;

    /// Fact carried along `edge`, given the fact at its flow source
    fn transfer_edge(&self, _edge: &IcfgEdge<N>, fact: &Self::Fact) -> Self::Fact {
        fact.clone()
    }
}

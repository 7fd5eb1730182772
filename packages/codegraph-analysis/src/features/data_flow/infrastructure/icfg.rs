//! Interprocedural control-flow graph
//!
//! Union of the CFGs of every reachable method that has a body. A call
//! node is *linked* when at least one of its callees has a body; for a
//! linked call node:
//! - its normal out-edges become call-to-return edges
//! - a call edge goes to the entry of every callee with a body
//! - a return edge goes from each such callee's exit to every return site

use super::cfg::Cfg;
use crate::errors::Result;
use crate::features::call_graph::CallGraph;
use crate::features::data_flow::domain::{IcfgEdge, IcfgEdgeKind, NodeId};
use crate::features::data_flow::ports::Icfg;
use crate::shared::models::{MethodId, Program};
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ProgramIcfg {
    entry_methods: Vec<MethodId>,
    nodes: Vec<NodeId>,
    out_edges: FxHashMap<NodeId, Vec<IcfgEdge<NodeId>>>,
    in_edges: FxHashMap<NodeId, Vec<IcfgEdge<NodeId>>>,
    /// Callees with bodies, per linked call node
    linked_callees: FxHashMap<NodeId, Vec<MethodId>>,
}

impl ProgramIcfg {
    pub fn build(program: &Program, call_graph: &CallGraph) -> Result<Self> {
        let mut icfg = Self {
            entry_methods: call_graph.entry_methods().to_vec(),
            ..Self::default()
        };

        let methods: Vec<MethodId> = call_graph
            .reachable_methods()
            .iter()
            .copied()
            .filter(|&m| program.body(m).is_some())
            .collect();

        for &method in &methods {
            for site in call_graph.call_sites_in(program, method) {
                let callees: Vec<MethodId> = call_graph
                    .callees_of(site)
                    .iter()
                    .copied()
                    .filter(|&c| program.body(c).is_some())
                    .collect();
                if !callees.is_empty() {
                    icfg.linked_callees
                        .insert(NodeId::stmt(site.method, site.index), callees);
                }
            }
        }

        let mut return_edges = Vec::new();
        for &method in &methods {
            let cfg = Cfg::build(program, method)?;
            icfg.nodes.extend_from_slice(cfg.nodes());

            for edge in cfg.edges() {
                match icfg.linked_callees.get(&edge.source) {
                    Some(callees) => {
                        let call = edge.source;
                        let return_site = edge.target;
                        for &callee in callees {
                            return_edges.push(IcfgEdge {
                                source: NodeId::exit(callee),
                                target: return_site,
                                kind: IcfgEdgeKind::Return,
                                call_site: Some(call),
                            });
                        }
                        icfg.add_edge(IcfgEdge {
                            source: call,
                            target: return_site,
                            kind: IcfgEdgeKind::CallToReturn,
                            call_site: Some(call),
                        });
                    }
                    None => icfg.add_edge(edge.clone()),
                }
            }
        }

        let mut calls: Vec<(NodeId, Vec<MethodId>)> = icfg
            .linked_callees
            .iter()
            .map(|(n, c)| (*n, c.clone()))
            .collect();
        calls.sort_unstable_by_key(|(n, _)| *n);
        for (call, callees) in calls {
            for callee in callees {
                icfg.add_edge(IcfgEdge {
                    source: call,
                    target: NodeId::entry(callee),
                    kind: IcfgEdgeKind::Call,
                    call_site: Some(call),
                });
            }
        }
        for edge in return_edges {
            icfg.add_edge(edge);
        }

        debug!(
            "ICFG: {} methods, {} nodes, {} linked call sites",
            methods.len(),
            icfg.nodes.len(),
            icfg.linked_callees.len()
        );
        Ok(icfg)
    }

    fn add_edge(&mut self, edge: IcfgEdge<NodeId>) {
        self.in_edges
            .entry(edge.target)
            .or_default()
            .push(edge.clone());
        self.out_edges.entry(edge.source).or_default().push(edge);
    }

    /// Whether `node` is a call with at least one analyzable callee
    pub fn is_linked_call(&self, node: NodeId) -> bool {
        self.linked_callees.contains_key(&node)
    }

    /// Callees with bodies of a linked call node
    pub fn callees_of(&self, node: NodeId) -> &[MethodId] {
        self.linked_callees
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `method` contributed its CFG
    pub fn contains_method(&self, method: MethodId) -> bool {
        self.out_edges.contains_key(&NodeId::entry(method))
    }
}

impl Icfg for ProgramIcfg {
    type Node = NodeId;

    fn entry_methods(&self) -> Vec<MethodId> {
        self.entry_methods.clone()
    }

    fn entry_of(&self, method: MethodId) -> NodeId {
        NodeId::entry(method)
    }

    fn exit_of(&self, method: MethodId) -> NodeId {
        NodeId::exit(method)
    }

    fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    fn in_edges_of(&self, node: NodeId) -> &[IcfgEdge<NodeId>] {
        self.in_edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn out_edges_of(&self, node: NodeId) -> &[IcfgEdge<NodeId>] {
        self.out_edges.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

//! Per-method control-flow graph
//!
//! Nodes: synthetic `Entry`, one per statement, synthetic `Exit`.
//!
//! Edges:
//! - entry → first statement (or exit for an empty body)
//! - fall-through to the next statement; the last statement falls into exit
//! - `Goto` → target
//! - `If`: true → target, false → next statement
//! - `Switch`: one edge per case plus the default edge
//! - `Return` → exit

use crate::errors::Result;
use crate::features::data_flow::domain::{CfgEdgeKind, IcfgEdge, NodeId};
use crate::features::data_flow::ports::Icfg;
use crate::shared::models::{MethodId, Program, Stmt};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Cfg {
    method: MethodId,
    nodes: Vec<NodeId>,
    out_edges: FxHashMap<NodeId, Vec<IcfgEdge<NodeId>>>,
    in_edges: FxHashMap<NodeId, Vec<IcfgEdge<NodeId>>>,
}

impl Cfg {
    /// Fails with `MissingBody` for abstract or native methods
    pub fn build(program: &Program, method: MethodId) -> Result<Self> {
        let body = program.require_body(method)?;
        let len = body.len();

        let mut cfg = Self {
            method,
            nodes: Vec::with_capacity(len + 2),
            out_edges: FxHashMap::default(),
            in_edges: FxHashMap::default(),
        };

        cfg.nodes.push(NodeId::entry(method));
        cfg.nodes
            .extend((0..len).map(|i| NodeId::stmt(method, i)));
        cfg.nodes.push(NodeId::exit(method));

        let node_at = |i: usize| {
            if i < len {
                NodeId::stmt(method, i)
            } else {
                NodeId::exit(method)
            }
        };

        cfg.add_edge(NodeId::entry(method), node_at(0), CfgEdgeKind::Entry);

        for (i, stmt) in body.stmts.iter().enumerate() {
            let node = NodeId::stmt(method, i);
            match stmt {
                Stmt::Goto { target } => cfg.add_edge(node, node_at(*target), CfgEdgeKind::Goto),
                Stmt::If { target, .. } => {
                    cfg.add_edge(node, node_at(*target), CfgEdgeKind::IfTrue);
                    cfg.add_edge(node, node_at(i + 1), CfgEdgeKind::IfFalse);
                }
                Stmt::Switch { cases, default, .. } => {
                    for &(value, target) in cases {
                        cfg.add_edge(node, node_at(target), CfgEdgeKind::SwitchCase(value));
                    }
                    cfg.add_edge(node, node_at(*default), CfgEdgeKind::SwitchDefault);
                }
                Stmt::Return { .. } => {
                    cfg.add_edge(node, NodeId::exit(method), CfgEdgeKind::Return)
                }
                _ => cfg.add_edge(node, node_at(i + 1), CfgEdgeKind::FallThrough),
            }
        }

        Ok(cfg)
    }

    fn add_edge(&mut self, source: NodeId, target: NodeId, kind: CfgEdgeKind) {
        let edge = IcfgEdge::normal(source, target, kind);
        self.in_edges.entry(target).or_default().push(edge.clone());
        self.out_edges.entry(source).or_default().push(edge);
    }

    pub fn method(&self) -> MethodId {
        self.method
    }

    pub fn entry(&self) -> NodeId {
        NodeId::entry(self.method)
    }

    pub fn exit(&self) -> NodeId {
        NodeId::exit(self.method)
    }

    /// Number of statement nodes
    pub fn stmt_count(&self) -> usize {
        self.nodes.len() - 2
    }

    /// All edges in node order
    pub fn edges(&self) -> impl Iterator<Item = &IcfgEdge<NodeId>> + '_ {
        self.nodes
            .iter()
            .flat_map(move |n| self.out_edges_of(*n).iter())
    }
}

impl Icfg for Cfg {
    type Node = NodeId;

    fn entry_methods(&self) -> Vec<MethodId> {
        vec![self.method]
    }

    fn entry_of(&self, method: MethodId) -> NodeId {
        debug_assert_eq!(method, self.method);
        NodeId::entry(method)
    }

    fn exit_of(&self, method: MethodId) -> NodeId {
        debug_assert_eq!(method, self.method);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AnalysisError;
    use crate::features::data_flow::domain::IcfgEdgeKind;
    use crate::shared::models::{BinaryExp, BinaryOp, ProgramBuilder, Type};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_branches_and_return() {
        let mut b = ProgramBuilder::new();
        let c = b.add_class("C", None);
        let m = b.add_method(c, "void m(int)", true);
        let p = b.new_var(m, "p", Type::INT);
        b.set_body(
            m,
            None,
            vec![p],
            vec![
                /* 0 */ Stmt::If { cond: BinaryExp::new(BinaryOp::Eq, p, p), target: 3 },
                /* 1 */ Stmt::Nop,
                /* 2 */ Stmt::Goto { target: 4 },
                /* 3 */ Stmt::Switch { var: p, cases: vec![(1, 1)], default: 4 },
                /* 4 */ Stmt::Return { value: None },
            ],
        );
        let program = b.build().unwrap();
        let cfg = Cfg::build(&program, m).unwrap();

        assert_eq!(cfg.nodes().len(), 7);
        assert_eq!(cfg.succs_of(cfg.entry()), vec![NodeId::stmt(m, 0)]);
        assert_eq!(
            cfg.succs_of(NodeId::stmt(m, 0)),
            vec![NodeId::stmt(m, 3), NodeId::stmt(m, 1)]
        );
        assert_eq!(cfg.succs_of(NodeId::stmt(m, 2)), vec![NodeId::stmt(m, 4)]);

        let kinds: Vec<_> = cfg
            .out_edges_of(NodeId::stmt(m, 3))
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                IcfgEdgeKind::Normal(CfgEdgeKind::SwitchCase(1)),
                IcfgEdgeKind::Normal(CfgEdgeKind::SwitchDefault),
            ]
        );
        assert_eq!(cfg.preds_of(cfg.exit()), vec![NodeId::stmt(m, 4)]);
        assert_eq!(
            cfg.preds_of(NodeId::stmt(m, 4)),
            vec![NodeId::stmt(m, 2), NodeId::stmt(m, 3)]
        );
    }

    #[test]
    fn test_empty_body_links_entry_to_exit() {
        let mut b = ProgramBuilder::new();
        let c = b.add_class("C", None);
        let m = b.add_method(c, "void m()", true);
        b.set_body(m, None, vec![], vec![]);
        let program = b.build().unwrap();

        let cfg = Cfg::build(&program, m).unwrap();
        assert_eq!(cfg.succs_of(cfg.entry()), vec![cfg.exit()]);
        assert_eq!(cfg.stmt_count(), 0);
    }

    #[test]
    fn test_missing_body() {
        let mut b = ProgramBuilder::new();
        let c = b.add_class("C", None);
        let m = b.add_abstract_method(c, "void m()");
        let program = b.build().unwrap();

        assert!(matches!(
            Cfg::build(&program, m),
            Err(AnalysisError::MissingBody(_))
        ));
    }
}

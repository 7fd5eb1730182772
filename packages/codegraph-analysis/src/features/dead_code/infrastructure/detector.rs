//! Dead-code detection
//!
//! A statement is dead when no feasible path from the method entry reaches it
//! (branches on constant conditions follow only the taken edge), or when it
//! assigns a side-effect-free value to a variable that is not live afterwards.

use crate::errors::Result;
use crate::features::constant_propagation::{ConstantPropagation, CpFact, Value};
use crate::features::data_flow::{
    Cfg, CfgEdgeKind, DataflowResult, Icfg, IcfgEdge, IcfgEdgeKind, NodeId,
};
use crate::features::liveness::{LiveVariableAnalysis, LiveVars};
use crate::shared::models::{BinaryOp, Exp, MethodId, Program, Stmt};
use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, VecDeque};
use tracing::debug;

pub struct DeadCodeDetection<'p> {
    program: &'p Program,
}

impl<'p> DeadCodeDetection<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    /// Run intraprocedural constant propagation and liveness on `method`,
    /// then detect its dead statements
    pub fn analyze(&self, method: MethodId) -> Result<BTreeSet<usize>> {
        let (cfg, constants) = ConstantPropagation::new(self.program).analyze(method)?;
        let live = LiveVariableAnalysis::new(self.program).analyze_cfg(&cfg);
        Ok(self.detect(&cfg, &constants, &live))
    }

    /// Dead statement indices of `cfg.method()`, sorted.
    ///
    /// `constants` may be an interprocedural result; only the facts of this
    /// method's nodes are read.
    pub fn detect(
        &self,
        cfg: &Cfg,
        constants: &DataflowResult<NodeId, CpFact>,
        live: &DataflowResult<NodeId, LiveVars>,
    ) -> BTreeSet<usize> {
        let method = cfg.method();
        let reachable = self.reachable_stmts(cfg, constants);

        let mut dead: BTreeSet<usize> = (0..cfg.stmt_count())
            .filter(|i| !reachable.contains(i))
            .collect();
        let unreachable = dead.len();

        for &i in &reachable {
            let Some(Stmt::Assign { lhs, rhs }) = self.program.stmt(method, i) else {
                continue;
            };
            let is_live = live
                .out_fact(NodeId::stmt(method, i))
                .is_some_and(|out| out.contains(lhs));
            if !is_live && has_no_side_effect(rhs) {
                dead.insert(i);
            }
        }

        debug!(
            "Dead code in {}: {} unreachable, {} dead assignments",
            self.program.signature(method),
            unreachable,
            dead.len() - unreachable
        );
        dead
    }

    fn reachable_stmts(
        &self,
        cfg: &Cfg,
        constants: &DataflowResult<NodeId, CpFact>,
    ) -> BTreeSet<usize> {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::from([cfg.entry()]);
        visited.insert(cfg.entry());
        let mut reachable = BTreeSet::new();

        while let Some(node) = queue.pop_front() {
            if let Some(i) = node.stmt_index() {
                reachable.insert(i);
            }
            for edge in self.feasible_edges(cfg, node, constants) {
                if visited.insert(edge.target) {
                    queue.push_back(edge.target);
                }
            }
        }
        reachable
    }

    /// Out-edges of `node` that can be taken under its in-fact
    fn feasible_edges<'c>(
        &self,
        cfg: &'c Cfg,
        node: NodeId,
        constants: &DataflowResult<NodeId, CpFact>,
    ) -> Vec<&'c IcfgEdge<NodeId>> {
        let edges = cfg.out_edges_of(node);
        let stmt = node
            .stmt_index()
            .and_then(|i| self.program.stmt(node.method, i));
        let Some(fact) = constants.in_fact(node) else {
            return edges.iter().collect();
        };

        match stmt {
            Some(Stmt::If { cond, .. }) => {
                let value = ConstantPropagation::evaluate_binary(
                    cond.op,
                    fact.get(cond.lhs),
                    fact.get(cond.rhs),
                );
                let Some(c) = value.as_constant() else {
                    return edges.iter().collect();
                };
                let taken = if c != 0 {
                    CfgEdgeKind::IfTrue
                } else {
                    CfgEdgeKind::IfFalse
                };
                edges
                    .iter()
                    .filter(|e| e.kind == IcfgEdgeKind::Normal(taken))
                    .collect()
            }
            Some(Stmt::Switch { var, .. }) => {
                let Value::Constant(v) = fact.get(*var) else {
                    return edges.iter().collect();
                };
                let cases: Vec<_> = edges
                    .iter()
                    .filter(|e| e.kind == IcfgEdgeKind::Normal(CfgEdgeKind::SwitchCase(v)))
                    .collect();
                if cases.is_empty() {
                    edges
                        .iter()
                        .filter(|e| e.kind == IcfgEdgeKind::Normal(CfgEdgeKind::SwitchDefault))
                        .collect()
                } else {
                    cases
                }
            }
            _ => edges.iter().collect(),
        }
    }
}

/// Whether evaluating `rhs` can neither throw nor allocate
fn has_no_side_effect(rhs: &Exp) -> bool {
    match rhs {
        Exp::New(_)
        | Exp::Cast { .. }
        | Exp::FieldAccess { .. }
        | Exp::ArrayAccess { .. }
        | Exp::ArrayLength(_) => false,
        Exp::Binary(b) => !matches!(b.op, BinaryOp::Div | BinaryOp::Rem),
        _ => true,
    }
}

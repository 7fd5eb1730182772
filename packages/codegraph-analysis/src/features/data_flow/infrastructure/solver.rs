//! Worklist fixpoint solver
//!
//! Classic Kildall-style iteration, generic over the graph ([`Icfg`]) and
//! the analysis ([`DataflowAnalysis`]).
//!
//! Forward:
//! 1. Boundary nodes (entries of entry methods) get `out = boundary`; every
//!    other node gets `in = out = initial`
//! 2. The queue is seeded with all non-boundary nodes
//! 3. Pop a node, `in ⊓= transfer_edge(e, out(pred))` for each in-edge, run
//!    `transfer_node(node, in, out)`; on change enqueue the successors
//!
//! Backward is the mirror image: boundary nodes are exits of entry methods,
//! facts flow from `in(succ)` over out-edges into `out`, and
//! `transfer_node(node, out, in)` runs against the flow.
//!
//! Facts accumulate across visits, so monotone transfer functions over a
//! finite-height lattice guarantee termination.
//!
//! References:
//! - Kildall, G. (1973). "A Unified Approach to Global Program Optimization"
//! - Kam, J. & Ullman, J. (1977). "Monotone Data Flow Analysis Frameworks"

use crate::features::data_flow::domain::DataflowResult;
use crate::features::data_flow::ports::{DataflowAnalysis, Icfg};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::debug;

/// FIFO queue that ignores nodes already pending
struct NodeQueue<N> {
    queue: VecDeque<N>,
    pending: FxHashSet<N>,
}

impl<N: Copy + Eq + std::hash::Hash> NodeQueue<N> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            pending: FxHashSet::default(),
        }
    }

    fn push(&mut self, node: N) {
        if self.pending.insert(node) {
            self.queue.push_back(node);
        }
    }

    fn pop(&mut self) -> Option<N> {
        let node = self.queue.pop_front()?;
        self.pending.remove(&node);
        Some(node)
    }
}

pub struct DataflowSolver<'a, I: Icfg, A: DataflowAnalysis<I::Node>> {
    analysis: &'a A,
    icfg: &'a I,
}

impl<'a, I: Icfg, A: DataflowAnalysis<I::Node>> DataflowSolver<'a, I, A> {
    pub fn new(analysis: &'a A, icfg: &'a I) -> Self {
        Self { analysis, icfg }
    }

    pub fn solve(&self) -> DataflowResult<I::Node, A::Fact> {
        let start = Instant::now();
        let (result, iterations) = if self.analysis.is_forward() {
            self.solve_forward()
        } else {
            self.solve_backward()
        };
        debug!(
            "Data-flow fixpoint: {} nodes, {} iterations in {:.2}ms",
            self.icfg.nodes().len(),
            iterations,
            start.elapsed().as_secs_f64() * 1000.0
        );
        result
    }

    fn initialize(&self, boundary: &FxHashSet<I::Node>) -> DataflowResult<I::Node, A::Fact> {
        let mut result = DataflowResult::new();
        for &node in self.icfg.nodes() {
            if boundary.contains(&node) {
                let fact = self.analysis.new_boundary_fact(node);
                result.set_in_fact(node, fact.clone());
                result.set_out_fact(node, fact);
            } else {
                result.set_in_fact(node, self.analysis.new_initial_fact());
                result.set_out_fact(node, self.analysis.new_initial_fact());
            }
        }
        result
    }

    fn solve_forward(&self) -> (DataflowResult<I::Node, A::Fact>, usize) {
        let boundary: FxHashSet<I::Node> = self
            .icfg
            .entry_methods()
            .into_iter()
            .map(|m| self.icfg.entry_of(m))
            .collect();
        let mut result = self.initialize(&boundary);

        let mut queue = NodeQueue::new();
        for &node in self.icfg.nodes() {
            if !boundary.contains(&node) {
                queue.push(node);
            }
        }

        let mut iterations = 0;
        while let Some(node) = queue.pop() {
            iterations += 1;
            let Some(mut in_fact) = result.take_in_fact(node) else {
                continue;
            };
            for edge in self.icfg.in_edges_of(node) {
                if let Some(pred_out) = result.out_fact(edge.source) {
                    let carried = self.analysis.transfer_edge(edge, pred_out);
                    self.analysis.meet_into(&carried, &mut in_fact);
                }
            }

            let changed = match result.out_fact_mut(node) {
                Some(out_fact) => self.analysis.transfer_node(node, &in_fact, out_fact),
                None => false,
            };
            result.set_in_fact(node, in_fact);

            if changed {
                for succ in self.icfg.succs_of(node) {
                    queue.push(succ);
                }
            }
        }
        (result, iterations)
    }

    fn solve_backward(&self) -> (DataflowResult<I::Node, A::Fact>, usize) {
        let boundary: FxHashSet<I::Node> = self
            .icfg
            .entry_methods()
            .into_iter()
            .map(|m| self.icfg.exit_of(m))
            .collect();
        let mut result = self.initialize(&boundary);

        let mut queue = NodeQueue::new();
        for &node in self.icfg.nodes().iter().rev() {
            if !boundary.contains(&node) {
                queue.push(node);
            }
        }

        let mut iterations = 0;
        while let Some(node) = queue.pop() {
            iterations += 1;
            let Some(mut out_fact) = result.take_out_fact(node) else {
                continue;
            };
            for edge in self.icfg.out_edges_of(node) {
                if let Some(succ_in) = result.in_fact(edge.target) {
                    let carried = self.analysis.transfer_edge(edge, succ_in);
                    self.analysis.meet_into(&carried, &mut out_fact);
                }
            }

            let changed = match result.in_fact_mut(node) {
                Some(in_fact) => self.analysis.transfer_node(node, &out_fact, in_fact),
                None => false,
            };
            result.set_out_fact(node, out_fact);

            if changed {
                for pred in self.icfg.preds_of(node) {
                    queue.push(pred);
                }
            }
        }
        (result, iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::data_flow::domain::{NodeId, NodeKind};
    use crate::features::data_flow::infrastructure::cfg::Cfg;
    use crate::shared::models::{BinaryExp, BinaryOp, ProgramBuilder, Stmt, Type};
    use std::collections::BTreeSet;

    /// Forward "may have visited" analysis: fact = set of statement indices
    /// on some path to the node.
    struct Visited;

    impl DataflowAnalysis<NodeId> for Visited {
        type Fact = BTreeSet<usize>;

        fn is_forward(&self) -> bool {
            true
        }

        fn new_boundary_fact(&self, _node: NodeId) -> Self::Fact {
            BTreeSet::new()
        }

        fn new_initial_fact(&self) -> Self::Fact {
            BTreeSet::new()
        }

        fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact) {
            target.extend(fact.iter().copied());
        }

        fn transfer_node(&self, node: NodeId, input: &Self::Fact, output: &mut Self::Fact) -> bool {
            let mut new_out = input.clone();
            if let NodeKind::Stmt(i) = node.kind {
                new_out.insert(i);
            }
            let changed = new_out != *output;
            *output = new_out;
            changed
        }
    }

    /// Backward mirror: statements that may still execute after the node
    struct Ahead;

    impl DataflowAnalysis<NodeId> for Ahead {
        type Fact = BTreeSet<usize>;

        fn is_forward(&self) -> bool {
            false
        }

        fn new_boundary_fact(&self, _node: NodeId) -> Self::Fact {
            BTreeSet::new()
        }

        fn new_initial_fact(&self) -> Self::Fact {
            BTreeSet::new()
        }

        fn meet_into(&self, fact: &Self::Fact, target: &mut Self::Fact) {
            target.extend(fact.iter().copied());
        }

        fn transfer_node(&self, node: NodeId, input: &Self::Fact, output: &mut Self::Fact) -> bool {
            Visited.transfer_node(node, input, output)
        }
    }

    /// 0: nop; 1: if p == p goto 0; 2: return
    fn looping_cfg() -> Cfg {
        let mut b = ProgramBuilder::new();
        let c = b.add_class("C", None);
        let m = b.add_method(c, "void m(int)", true);
        let p = b.new_var(m, "p", Type::INT);
        b.set_body(
            m,
            None,
            vec![p],
            vec![
                Stmt::Nop,
                Stmt::If { cond: BinaryExp::new(BinaryOp::Eq, p, p), target: 0 },
                Stmt::Return { value: None },
            ],
        );
        let program = b.build().unwrap();
        Cfg::build(&program, m).unwrap()
    }

    #[test]
    fn test_forward_reaches_fixpoint_through_loop() {
        let cfg = looping_cfg();
        let m = cfg.method();
        let result = DataflowSolver::new(&Visited, &cfg).solve();

        // The loop back-edge brings statement 1 into the in-fact of 0
        assert_eq!(
            result.in_fact(NodeId::stmt(m, 0)),
            Some(&BTreeSet::from([0, 1]))
        );
        assert_eq!(
            result.out_fact(cfg.exit()),
            Some(&BTreeSet::from([0, 1, 2]))
        );
        assert_eq!(result.out_fact(cfg.entry()), Some(&BTreeSet::new()));
    }

    #[test]
    fn test_backward_mirrors_forward() {
        let cfg = looping_cfg();
        let m = cfg.method();
        let result = DataflowSolver::new(&Ahead, &cfg).solve();

        assert_eq!(
            result.in_fact(NodeId::stmt(m, 1)),
            Some(&BTreeSet::from([0, 1, 2]))
        );
        assert_eq!(
            result.out_fact(NodeId::stmt(m, 1)),
            Some(&BTreeSet::from([0, 1, 2]))
        );
        assert_eq!(result.in_fact(cfg.exit()), Some(&BTreeSet::new()));
        assert_eq!(result.in_fact(NodeId::stmt(m, 2)), Some(&BTreeSet::from([2])));
    }
}

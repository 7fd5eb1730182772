//! Live variable analysis on a method CFG
//!
//! `in = (out \ def) ∪ uses`, meet is union, boundary and initial facts
//! are empty.

use crate::errors::Result;
use crate::features::data_flow::{Cfg, DataflowAnalysis, DataflowResult, DataflowSolver, NodeId};
use crate::shared::models::{MethodId, Program, VarId};
use std::collections::BTreeSet;

pub type LiveVars = BTreeSet<VarId>;

pub struct LiveVariableAnalysis<'p> {
    program: &'p Program,
}

impl<'p> LiveVariableAnalysis<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    pub fn analyze(&self, method: MethodId) -> Result<DataflowResult<NodeId, LiveVars>> {
        let cfg = Cfg::build(self.program, method)?;
        Ok(self.analyze_cfg(&cfg))
    }

    /// Solve over an already built CFG
    pub fn analyze_cfg(&self, cfg: &Cfg) -> DataflowResult<NodeId, LiveVars> {
        DataflowSolver::new(self, cfg).solve()
    }
}

impl DataflowAnalysis<NodeId> for LiveVariableAnalysis<'_> {
    type Fact = LiveVars;

    fn is_forward(&self) -> bool {
        false
    }

    fn new_boundary_fact(&self, _node: NodeId) -> LiveVars {
        LiveVars::new()
    }

    fn new_initial_fact(&self) -> LiveVars {
        LiveVars::new()
    }

    fn meet_into(&self, fact: &LiveVars, target: &mut LiveVars) {
        target.extend(fact.iter().copied());
    }

    fn transfer_node(&self, node: NodeId, out: &LiveVars, input: &mut LiveVars) -> bool {
        let mut live = out.clone();
        if let Some(stmt) = node
            .stmt_index()
            .and_then(|i| self.program.stmt(node.method, i))
        {
            if let Some(def) = stmt.def() {
                live.remove(&def);
            }
            live.extend(stmt.uses());
        }

        if live == *input {
            false
        } else {
            *input = live;
            true
        }
    }
}

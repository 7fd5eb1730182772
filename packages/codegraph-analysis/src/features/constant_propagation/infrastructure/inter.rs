//! Interprocedural constant propagation over the [`ProgramIcfg`]
//!
//! Node transfer is the intraprocedural one, except that a linked call node
//! passes its in-fact through unchanged. The call's effect is modelled on
//! the edges instead:
//! - call-to-return: drops the call's result variable
//! - call: binds arguments to the callee's parameters in a fresh fact
//! - return: binds the meet of the callee's return variables to the result
//!   variable in a fresh fact

use super::analysis::ConstantPropagation;
use crate::features::constant_propagation::domain::{CpFact, Value};
use crate::features::data_flow::{
    DataflowAnalysis, DataflowResult, DataflowSolver, IcfgEdge, IcfgEdgeKind, NodeId, ProgramIcfg,
};
use crate::shared::models::{Program, Stmt, VarId};

pub struct InterConstantPropagation<'p> {
    program: &'p Program,
    icfg: &'p ProgramIcfg,
    intra: ConstantPropagation<'p>,
}

impl<'p> InterConstantPropagation<'p> {
    pub fn new(program: &'p Program, icfg: &'p ProgramIcfg) -> Self {
        Self {
            program,
            icfg,
            intra: ConstantPropagation::new(program),
        }
    }

    pub fn analyze(&self) -> DataflowResult<NodeId, CpFact> {
        DataflowSolver::new(self, self.icfg).solve()
    }

    fn call_at(&self, node: NodeId) -> Option<(Option<VarId>, &[VarId])> {
        let index = node.stmt_index()?;
        match self.program.stmt(node.method, index)? {
            Stmt::Invoke { lhs, call } => Some((*lhs, call.args.as_slice())),
            _ => None,
        }
    }

    fn bind_args(&self, edge: &IcfgEdge<NodeId>, fact: &CpFact) -> CpFact {
        let mut bound = CpFact::new();
        let Some((_, args)) = edge.call_site.and_then(|site| self.call_at(site)) else {
            return bound;
        };
        for (&param, &arg) in self.program.params(edge.target.method).iter().zip(args) {
            if self.intra.can_hold_int(param) {
                bound.update(param, fact.get(arg));
            }
        }
        bound
    }

    fn bind_return(&self, edge: &IcfgEdge<NodeId>, fact: &CpFact) -> CpFact {
        let mut bound = CpFact::new();
        let Some((Some(lhs), _)) = edge.call_site.and_then(|site| self.call_at(site)) else {
            return bound;
        };
        if !self.intra.can_hold_int(lhs) {
            return bound;
        }
        let value = self
            .program
            .body(edge.source.method)
            .map(|body| {
                body.return_vars()
                    .iter()
                    .fold(Value::Undef, |acc, &v| acc.meet(fact.get(v)))
            })
            .unwrap_or(Value::Undef);
        bound.update(lhs, value);
        bound
    }
}

impl DataflowAnalysis<NodeId> for InterConstantPropagation<'_> {
    type Fact = CpFact;

    fn is_forward(&self) -> bool {
        true
    }

    fn new_boundary_fact(&self, node: NodeId) -> CpFact {
        self.intra.params_as_nac(node.method)
    }

    fn new_initial_fact(&self) -> CpFact {
        CpFact::new()
    }

    fn meet_into(&self, fact: &CpFact, target: &mut CpFact) {
        fact.meet_into(target);
    }

    fn transfer_node(&self, node: NodeId, input: &CpFact, output: &mut CpFact) -> bool {
        if self.icfg.is_linked_call(node) {
            output.copy_from(input)
        } else {
            self.intra.transfer_stmt(node, input, output)
        }
    }

    fn transfer_edge(&self, edge: &IcfgEdge<NodeId>, fact: &CpFact) -> CpFact {
        match edge.kind {
            IcfgEdgeKind::Normal(_) => fact.clone(),
            IcfgEdgeKind::CallToReturn => {
                let mut out = fact.clone();
                if let Some((Some(lhs), _)) = self.call_at(edge.source) {
                    out.remove(lhs);
                }
                out
            }
            IcfgEdgeKind::Call => self.bind_args(edge, fact),
            IcfgEdgeKind::Return => self.bind_return(edge, fact),
        }
    }
}

//! High-Level Points-to Analyzer
//!
//! Picks the heap model from [`PtaConfig`], runs the solver to fixpoint and
//! hands back a read-only [`PointerAnalysisResult`].
//!
//! # Usage
//! ```text
//! use codegraph_analysis::features::points_to::PointerAnalyzer;
//!
//! let result = PointerAnalyzer::new(PtaConfig::default()).analyze(&program)?;
//! assert!(result.may_alias(x, y));
//! let callees = result.call_graph().callees_of(site);
//! ```

use crate::config::{HeapModelKind, PtaConfig};
use crate::errors::Result;
use crate::features::call_graph::CallGraph;
use crate::features::points_to::domain::{Obj, ObjId, Pointer, PointsToSet};
use crate::features::points_to::infrastructure::{
    AllocationSiteHeapModel, PointerFlowGraph, PtaStats, Solver, TypeBasedHeapModel,
};
use crate::features::points_to::ports::HeapModel;
use crate::shared::models::{MethodId, Program, VarId};
use std::collections::BTreeMap;

static EMPTY: PointsToSet = PointsToSet::new();

/// Converged pointer-analysis state
#[derive(Debug)]
pub struct PointerAnalysisResult {
    pfg: PointerFlowGraph,
    call_graph: CallGraph,
    objects: Vec<Obj>,
    stats: PtaStats,
}

impl PointerAnalysisResult {
    pub(crate) fn new(
        pfg: PointerFlowGraph,
        call_graph: CallGraph,
        objects: Vec<Obj>,
        stats: PtaStats,
    ) -> Self {
        Self {
            pfg,
            call_graph,
            objects,
            stats,
        }
    }

    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    pub fn pfg(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn objects(&self) -> &[Obj] {
        &self.objects
    }

    pub fn object(&self, id: ObjId) -> &Obj {
        &self.objects[id.index()]
    }

    pub fn stats(&self) -> &PtaStats {
        &self.stats
    }

    /// Points-to set of any pointer; empty if the pointer never appeared
    pub fn points_to(&self, pointer: Pointer) -> &PointsToSet {
        self.pfg
            .lookup(pointer)
            .map(|id| self.pfg.points_to(id))
            .unwrap_or(&EMPTY)
    }

    pub fn points_to_var(&self, var: VarId) -> &PointsToSet {
        self.points_to(Pointer::Var(var))
    }

    /// Whether two variables may reference the same object
    pub fn may_alias(&self, a: VarId, b: VarId) -> bool {
        self.points_to_var(a).intersects(self.points_to_var(b))
    }

    /// Non-empty variable points-to sets, ordered by variable
    pub fn var_points_to(&self) -> BTreeMap<VarId, Vec<ObjId>> {
        self.pfg
            .pointers()
            .filter_map(|(id, pointer)| {
                let var = pointer.as_var()?;
                let pts = self.pfg.points_to(id);
                (!pts.is_empty()).then(|| (var, pts.as_slice().to_vec()))
            })
            .collect()
    }

    pub fn into_call_graph(self) -> CallGraph {
        self.call_graph
    }
}

/// Pointer analysis entry point
#[derive(Debug, Clone, Default)]
pub struct PointerAnalyzer {
    config: PtaConfig,
    entry: Option<MethodId>,
}

impl PointerAnalyzer {
    pub fn new(config: PtaConfig) -> Self {
        Self {
            config,
            entry: None,
        }
    }

    /// Start from `entry` instead of the program's entry method
    pub fn with_entry(mut self, entry: MethodId) -> Self {
        self.entry = Some(entry);
        self
    }

    pub fn analyze(&self, program: &Program) -> Result<PointerAnalysisResult> {
        match self.config.heap_model {
            HeapModelKind::AllocationSite => self.run(program, AllocationSiteHeapModel::new()),
            HeapModelKind::TypeBased => self.run(program, TypeBasedHeapModel::new()),
        }
    }

    fn run<H: HeapModel>(&self, program: &Program, heap: H) -> Result<PointerAnalysisResult> {
        let mut solver = Solver::new(program, heap);
        if let Some(entry) = self.entry {
            solver = solver.with_entry(entry);
        }
        solver.solve()?;
        Ok(solver.into_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Exp, ProgramBuilder, Stmt, Type};

    fn two_allocations() -> (Program, [VarId; 3]) {
        let mut b = ProgramBuilder::new();
        let a = b.add_class("A", None);
        let main = b.add_method(a, "void main()", true);
        let x = b.new_var(main, "x", Type::Class(a));
        let y = b.new_var(main, "y", Type::Class(a));
        let z = b.new_var(main, "z", Type::Class(a));
        b.set_body(
            main,
            None,
            vec![],
            vec![
                Stmt::Assign { lhs: x, rhs: Exp::New(Type::Class(a)) },
                Stmt::Assign { lhs: y, rhs: Exp::New(Type::Class(a)) },
                Stmt::Assign { lhs: z, rhs: Exp::Var(x) },
            ],
        );
        b.set_entry(main);
        (b.build().unwrap(), [x, y, z])
    }

    #[test]
    fn test_allocation_site_heap_separates_objects() {
        let (program, [x, y, z]) = two_allocations();
        let result = PointerAnalyzer::default().analyze(&program).unwrap();

        assert!(result.may_alias(x, z));
        assert!(!result.may_alias(x, y));
        assert_eq!(result.objects().len(), 2);
        assert_eq!(result.var_points_to().len(), 3);
    }

    #[test]
    fn test_type_based_heap_merges_objects() {
        let (program, [x, y, _]) = two_allocations();
        let config = PtaConfig::default().heap_model(HeapModelKind::TypeBased);
        let result = PointerAnalyzer::new(config).analyze(&program).unwrap();

        assert!(result.may_alias(x, y));
        assert_eq!(result.objects().len(), 1);
    }

    #[test]
    fn test_unknown_pointer_has_empty_set() {
        let (program, _) = two_allocations();
        let result = PointerAnalyzer::default().analyze(&program).unwrap();
        assert!(result.points_to(Pointer::ArrayIndex(ObjId(0))).is_empty());
    }
}

//! Context-insensitive pointer analysis with on-the-fly call graph
//!
//! Andersen-style inclusion analysis where call-graph construction and
//! points-to propagation drive each other:
//! - reachable statements add PFG edges and seed the work list
//! - propagating a new object into a variable resolves the field/array
//!   accesses and virtual calls whose base is that variable
//! - resolved calls make new methods reachable
//!
//! Newly reachable methods are queued and processed by the driving loop
//! rather than recursively, so long call chains cannot exhaust the stack.
//!
//! # References
//! - Andersen, L. O. "Program Analysis and Specialization for C" (PhD 1994)
//! - Lhoták & Hendren "Scaling Java Points-to Analysis using Spark" (CC 2003)

use super::pointer_flow_graph::{PointerFlowGraph, PointerId};
use super::work_list::WorkList;
use crate::errors::{AnalysisError, Result};
use crate::features::call_graph::{CallEdge, CallGraph, CallSite};
use crate::features::points_to::application::analyzer::PointerAnalysisResult;
use crate::features::points_to::domain::{ObjId, Pointer, PointsToSet};
use crate::features::points_to::ports::HeapModel;
use crate::shared::models::{
    Access, CallKind, Exp, InvokeExp, MethodId, Program, Stmt, StmtRef, Type, VarId,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Statistics for the pointer analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PtaStats {
    pub reachable_methods: usize,
    pub statements_processed: usize,
    pub pointers: usize,
    pub pfg_edges: usize,
    pub call_edges: usize,
    pub objects: usize,
    pub work_list_entries: usize,
    pub propagations: usize,
    pub duration_ms: f64,
}

pub struct Solver<'p, H: HeapModel> {
    program: &'p Program,
    heap: H,
    pfg: PointerFlowGraph,
    call_graph: CallGraph,
    work_list: WorkList,

    /// Reachable methods whose statements are not processed yet
    pending: VecDeque<MethodId>,

    /// Overrides the program's entry method
    entry: Option<MethodId>,
    initialized: bool,
    stats: PtaStats,
    elapsed_ms: f64,
}

impl<'p, H: HeapModel> Solver<'p, H> {
    pub fn new(program: &'p Program, heap: H) -> Self {
        Self {
            program,
            heap,
            pfg: PointerFlowGraph::new(),
            call_graph: CallGraph::new(),
            work_list: WorkList::new(),
            pending: VecDeque::new(),
            entry: None,
            initialized: false,
            stats: PtaStats::default(),
            elapsed_ms: 0.0,
        }
    }

    /// Start from `entry` instead of the program's entry method
    pub fn with_entry(mut self, entry: MethodId) -> Self {
        self.entry = Some(entry);
        self
    }

    /// Register the entry method as call-graph entry and reachable.
    ///
    /// Idempotent. Fails with `NoEntryMethod` before any analysis work when
    /// neither an override nor a program entry exists.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        let entry = self
            .entry
            .or(self.program.entry_method())
            .ok_or(AnalysisError::NoEntryMethod)?;

        info!(
            "Pointer analysis: starting from {}",
            self.program.signature(entry)
        );
        self.call_graph.add_entry_method(entry);
        self.add_reachable(entry);
        self.initialized = true;
        Ok(())
    }

    /// Process pending methods, then one work-list entry.
    ///
    /// Returns `false` once the fixpoint is reached.
    pub fn step(&mut self) -> bool {
        self.process_pending();

        let Some((n, pts)) = self.work_list.poll_entry() else {
            return false;
        };
        self.stats.work_list_entries += 1;

        let delta = self.propagate(n, &pts);
        if let Pointer::Var(var) = self.pfg.pointer(n) {
            for obj in delta.iter() {
                self.process_instance_accesses(var, obj);
                self.process_calls(var, obj);
            }
        }
        true
    }

    /// Run to fixpoint. Re-solving a converged solver changes nothing.
    pub fn solve(&mut self) -> Result<()> {
        let start = Instant::now();
        self.initialize()?;
        while self.step() {}
        self.elapsed_ms += start.elapsed().as_secs_f64() * 1000.0;

        let stats = self.stats();
        info!(
            "Pointer analysis done: {} reachable methods, {} statements, {} pointers, \
             {} PFG edges, {} call edges, {} objects in {:.2}ms",
            stats.reachable_methods,
            stats.statements_processed,
            stats.pointers,
            stats.pfg_edges,
            stats.call_edges,
            stats.objects,
            stats.duration_ms
        );
        Ok(())
    }

    pub fn pfg(&self) -> &PointerFlowGraph {
        &self.pfg
    }

    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    pub fn heap(&self) -> &H {
        &self.heap
    }

    /// Current points-to set of `var` (empty if it has no node yet)
    pub fn points_to_var(&self, var: VarId) -> PointsToSet {
        self.pfg
            .lookup(Pointer::Var(var))
            .map(|id| self.pfg.points_to(id).clone())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> PtaStats {
        PtaStats {
            reachable_methods: self.call_graph.reachable_methods().len(),
            pointers: self.pfg.pointer_count(),
            pfg_edges: self.pfg.edge_count(),
            call_edges: self.call_graph.num_edges(),
            objects: self.heap.objects().len(),
            duration_ms: self.elapsed_ms,
            ..self.stats.clone()
        }
    }

    pub fn into_result(self) -> PointerAnalysisResult {
        let stats = self.stats();
        PointerAnalysisResult::new(
            self.pfg,
            self.call_graph,
            self.heap.objects().to_vec(),
            stats,
        )
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Reachable methods
    // ═══════════════════════════════════════════════════════════════════════

    fn add_reachable(&mut self, method: MethodId) {
        if self.call_graph.add_reachable_method(method) {
            debug!("Reachable: {}", self.program.signature(method));
            self.pending.push_back(method);
        }
    }

    fn process_pending(&mut self) {
        let program = self.program;
        while let Some(method) = self.pending.pop_front() {
            let Some(body) = program.body(method) else {
                continue;
            };
            for (index, stmt) in body.stmts.iter().enumerate() {
                self.stats.statements_processed += 1;
                self.process_stmt(method, index, stmt);
            }
        }
    }

    fn process_stmt(&mut self, method: MethodId, index: usize, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { lhs, rhs } => match rhs {
                Exp::New(ty) => {
                    let obj = self.heap.obj(StmtRef::new(method, index), ty);
                    let x = self.pfg.var_ptr(*lhs);
                    self.work_list.add_entry(x, PointsToSet::singleton(obj));
                }
                Exp::Var(rhs) => {
                    let src = self.pfg.var_ptr(*rhs);
                    let dst = self.pfg.var_ptr(*lhs);
                    self.add_pfg_edge(src, dst);
                }
                Exp::FieldAccess { base: None, field } => {
                    let src = self.pfg.static_field(*field);
                    let dst = self.pfg.var_ptr(*lhs);
                    self.add_pfg_edge(src, dst);
                }
                _ => {}
            },
            Stmt::Store {
                target: Access::Field { base: None, field },
                rhs,
            } => {
                let src = self.pfg.var_ptr(*rhs);
                let dst = self.pfg.static_field(*field);
                self.add_pfg_edge(src, dst);
            }
            Stmt::Invoke { lhs, call } if call.is_static() => {
                let site = CallSite::new(method, index);
                match self.resolve_callee(None, call) {
                    Some(callee) => {
                        if self.call_graph.add_edge(CallEdge::new(call.kind, site, callee)) {
                            debug!("Call edge: {} -> {}", site, self.program.signature(callee));
                            self.add_reachable(callee);
                            self.bind_call(call, *lhs, callee);
                        }
                    }
                    None => warn!(
                        "No target for static call {} at {}",
                        call.method_ref.subsignature, site
                    ),
                }
            }
            _ => {}
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Propagation
    // ═══════════════════════════════════════════════════════════════════════

    fn add_pfg_edge(&mut self, src: PointerId, dst: PointerId) {
        if self.pfg.add_edge(src, dst) {
            let pts = self.pfg.points_to(src);
            if !pts.is_empty() {
                let pts = pts.clone();
                self.work_list.add_entry(dst, pts);
            }
        }
    }

    /// Add `pts \ pt(n)` to `pt(n)` and forward the delta to successors
    fn propagate(&mut self, n: PointerId, pts: &PointsToSet) -> PointsToSet {
        let delta = pts.difference(self.pfg.points_to(n));
        if !delta.is_empty() {
            self.stats.propagations += 1;
            trace!("pt({}) += {:?}", self.pfg.pointer(n), delta.as_slice());
            self.pfg.points_to_mut(n).union_with(&delta);
            let succs: Vec<PointerId> = self.pfg.succs_of(n).collect();
            for succ in succs {
                self.work_list.add_entry(succ, delta.clone());
            }
        }
        delta
    }

    /// Field and array accesses whose base is `var`, now that `var` may
    /// point to `obj`
    fn process_instance_accesses(&mut self, var: VarId, obj: ObjId) {
        let program = self.program;
        let Some(body) = program.body(program.var(var).method) else {
            return;
        };
        let Some(uses) = body.uses_of(var) else {
            return;
        };

        for &i in &uses.store_fields {
            if let Stmt::Store {
                target: Access::Field { field, .. },
                rhs,
            } = &body.stmts[i]
            {
                let src = self.pfg.var_ptr(*rhs);
                let dst = self.pfg.instance_field(obj, *field);
                self.add_pfg_edge(src, dst);
            }
        }
        for &i in &uses.load_fields {
            if let Stmt::Assign {
                lhs,
                rhs: Exp::FieldAccess { field, .. },
            } = &body.stmts[i]
            {
                let src = self.pfg.instance_field(obj, *field);
                let dst = self.pfg.var_ptr(*lhs);
                self.add_pfg_edge(src, dst);
            }
        }
        for &i in &uses.store_arrays {
            if let Stmt::Store { rhs, .. } = &body.stmts[i] {
                let src = self.pfg.var_ptr(*rhs);
                let dst = self.pfg.array_index(obj);
                self.add_pfg_edge(src, dst);
            }
        }
        for &i in &uses.load_arrays {
            if let Stmt::Assign { lhs, .. } = &body.stmts[i] {
                let src = self.pfg.array_index(obj);
                let dst = self.pfg.var_ptr(*lhs);
                self.add_pfg_edge(src, dst);
            }
        }
    }

    /// Call sites with receiver `var`, dispatched on `obj`
    fn process_calls(&mut self, var: VarId, obj: ObjId) {
        let program = self.program;
        let method = program.var(var).method;
        let Some(body) = program.body(method) else {
            return;
        };
        let Some(uses) = body.uses_of(var) else {
            return;
        };

        for &i in &uses.invokes {
            let Stmt::Invoke { lhs, call } = &body.stmts[i] else {
                continue;
            };
            let site = CallSite::new(method, i);
            let Some(callee) = self.resolve_callee(Some(obj), call) else {
                warn!(
                    "No target for {} on {} at {}",
                    call.method_ref.subsignature, obj, site
                );
                continue;
            };

            if let Some(this) = program.body(callee).and_then(|b| b.this) {
                let this_ptr = self.pfg.var_ptr(this);
                self.work_list
                    .add_entry(this_ptr, PointsToSet::singleton(obj));
            }
            if self.call_graph.add_edge(CallEdge::new(call.kind, site, callee)) {
                debug!("Call edge: {} -> {}", site, program.signature(callee));
                self.add_reachable(callee);
                self.bind_call(call, *lhs, callee);
            }
        }
    }

    /// Arguments → parameters, return variables → call result
    fn bind_call(&mut self, call: &InvokeExp, lhs: Option<VarId>, callee: MethodId) {
        let program = self.program;
        let Some(body) = program.body(callee) else {
            return;
        };
        for (&arg, &param) in call.args.iter().zip(&body.params) {
            let src = self.pfg.var_ptr(arg);
            let dst = self.pfg.var_ptr(param);
            self.add_pfg_edge(src, dst);
        }
        if let Some(lhs) = lhs {
            for &ret in body.return_vars() {
                let src = self.pfg.var_ptr(ret);
                let dst = self.pfg.var_ptr(lhs);
                self.add_pfg_edge(src, dst);
            }
        }
    }

    /// Target of `call`, dispatched on `recv` for virtual and interface calls
    fn resolve_callee(&self, recv: Option<ObjId>, call: &InvokeExp) -> Option<MethodId> {
        let class = call.method_ref.class;
        let subsig = call.method_ref.subsignature.as_str();
        match call.kind {
            CallKind::Static => self.program.resolve_method(class, subsig),
            CallKind::Special => {
                debug_assert!(recv.is_some(), "special call resolved without receiver");
                self.program.dispatch(class, subsig)
            }
            CallKind::Virtual | CallKind::Interface => {
                debug_assert!(recv.is_some(), "virtual call resolved without receiver");
                let obj = self.heap.object(recv?);
                match &obj.ty {
                    Type::Class(c) => self.program.dispatch(*c, subsig),
                    Type::Array(_) => self
                        .program
                        .root_class()
                        .and_then(|root| self.program.dispatch(root, subsig)),
                    _ => None,
                }
            }
            CallKind::Dynamic => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::points_to::infrastructure::heap_model::AllocationSiteHeapModel;
    use crate::shared::models::{MethodRef, ProgramBuilder};

    #[test]
    fn test_missing_entry_is_fatal() {
        let mut b = ProgramBuilder::new();
        let a = b.add_class("A", None);
        b.add_method(a, "void m()", true);
        let program = b.build().unwrap();

        let mut solver = Solver::new(&program, AllocationSiteHeapModel::new());
        assert!(matches!(solver.solve(), Err(AnalysisError::NoEntryMethod)));
        assert_eq!(solver.stats().statements_processed, 0);
    }

    #[test]
    fn test_copy_and_static_field_flow() {
        let mut b = ProgramBuilder::new();
        let a = b.add_class("A", None);
        let f = b.add_field(a, "F", Type::Class(a), true);
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
                Stmt::Store { target: Access::Field { base: None, field: f }, rhs: x },
                Stmt::Assign { lhs: y, rhs: Exp::FieldAccess { base: None, field: f } },
                Stmt::Assign { lhs: z, rhs: Exp::Var(y) },
            ],
        );
        b.set_entry(main);
        let program = b.build().unwrap();

        let mut solver = Solver::new(&program, AllocationSiteHeapModel::new());
        solver.solve().unwrap();

        let pt_x = solver.points_to_var(x);
        assert_eq!(pt_x.len(), 1);
        assert_eq!(solver.points_to_var(z), pt_x);
        assert_eq!(solver.stats().statements_processed, 4);
    }

    #[test]
    fn test_instance_call_binds_this_and_return() {
        let mut b = ProgramBuilder::new();
        let a = b.add_class("A", None);
        let get = b.add_method(a, "A self()", false);
        let this = b.new_var(get, "this", Type::Class(a));
        b.set_body(get, Some(this), vec![], vec![Stmt::Return { value: Some(this) }]);

        let main = b.add_method(a, "void main()", true);
        let x = b.new_var(main, "x", Type::Class(a));
        let r = b.new_var(main, "r", Type::Class(a));
        b.set_body(
            main,
            None,
            vec![],
            vec![
                Stmt::Assign { lhs: x, rhs: Exp::New(Type::Class(a)) },
                Stmt::Invoke {
                    lhs: Some(r),
                    call: InvokeExp::new_instance(
                        CallKind::Virtual,
                        MethodRef::new(a, "A self()"),
                        x,
                        vec![],
                    ),
                },
            ],
        );
        b.set_entry(main);
        let program = b.build().unwrap();

        let mut solver = Solver::new(&program, AllocationSiteHeapModel::new());
        solver.solve().unwrap();

        assert_eq!(solver.points_to_var(r), solver.points_to_var(x));
        assert_eq!(solver.points_to_var(this), solver.points_to_var(x));
        assert!(solver.call_graph().has_edge(CallSite::new(main, 1), get));
    }
}

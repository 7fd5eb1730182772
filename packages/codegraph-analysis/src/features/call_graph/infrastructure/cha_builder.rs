//! Class Hierarchy Analysis (CHA) call graph builder
//!
//! Resolves every call site from its declared class only: a virtual call
//! may target the dispatch result of any subtype of the declared class.
//! Sound but imprecise; every target the points-to solver finds for a site
//! is also found here.

use crate::features::call_graph::domain::call_graph::{CallEdge, CallGraph, CallSite};
use crate::shared::models::{CallKind, InvokeExp, MethodId, Program, Stmt};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct ChaBuilder<'p> {
    program: &'p Program,
}

impl<'p> ChaBuilder<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    /// BFS over methods reachable from `entry`
    pub fn build(&self, entry: MethodId) -> CallGraph {
        let start = Instant::now();
        let mut call_graph = CallGraph::new();
        call_graph.add_entry_method(entry);
        call_graph.add_reachable_method(entry);

        let mut queue = VecDeque::from([entry]);
        while let Some(method) = queue.pop_front() {
            let Some(body) = self.program.body(method) else {
                continue;
            };
            for (index, stmt) in body.stmts.iter().enumerate() {
                let Stmt::Invoke { call, .. } = stmt else {
                    continue;
                };
                let site = CallSite::new(method, index);
                let targets = self.resolve(call);
                if targets.is_empty() && call.kind != CallKind::Dynamic {
                    warn!(
                        "CHA: no target for {} at {}",
                        call.method_ref.subsignature, site
                    );
                }
                for callee in targets {
                    call_graph.add_edge(CallEdge::new(call.kind, site, callee));
                    if call_graph.add_reachable_method(callee) {
                        debug!("CHA: reachable {}", self.program.signature(callee));
                        queue.push_back(callee);
                    }
                }
            }
        }

        info!(
            "CHA call graph: {} reachable methods, {} edges in {:.2}ms",
            call_graph.reachable_methods().len(),
            call_graph.num_edges(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        call_graph
    }

    /// Possible targets of a call site, in discovery order
    pub fn resolve(&self, call: &InvokeExp) -> Vec<MethodId> {
        let class = call.method_ref.class;
        let subsig = call.method_ref.subsignature.as_str();
        match call.kind {
            CallKind::Static => self.program.resolve_method(class, subsig).into_iter().collect(),
            CallKind::Special => self.program.dispatch(class, subsig).into_iter().collect(),
            CallKind::Virtual | CallKind::Interface => {
                let mut targets = Vec::new();
                for sub in self.program.hierarchy().subtypes_of(class) {
                    if let Some(m) = self.program.dispatch(sub, subsig) {
                        if !targets.contains(&m) {
                            targets.push(m);
                        }
                    }
                }
                targets
            }
            CallKind::Dynamic => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{ClassId, Exp, MethodRef, ProgramBuilder, Type, VarId};

    /// `Main.main` calls `x.m()` with `A x`; B and C extend A, only A and B
    /// declare `m`.
    fn program() -> (Program, MethodId, [MethodId; 2], ClassId) {
        let mut b = ProgramBuilder::new();
        let a = b.add_class("A", None);
        let class_b = b.add_class("B", Some(a));
        let _c = b.add_class("C", Some(a));
        let main_cls = b.add_class("Main", None);

        let a_m = b.add_method(a, "void m()", false);
        let b_m = b.add_method(class_b, "void m()", false);
        for (m, name) in [(a_m, "this_a"), (b_m, "this_b")] {
            let this = b.new_var(m, name, Type::Class(a));
            b.set_body(m, Some(this), vec![], vec![Stmt::Return { value: None }]);
        }

        let main = b.add_method(main_cls, "void main()", true);
        let x = b.new_var(main, "x", Type::Class(a));
        b.set_body(
            main,
            None,
            vec![],
            vec![
                Stmt::Assign { lhs: x, rhs: Exp::New(Type::Class(a)) },
                Stmt::Invoke {
                    lhs: None,
                    call: InvokeExp::new_instance(
                        CallKind::Virtual,
                        MethodRef::new(a, "void m()"),
                        x,
                        vec![],
                    ),
                },
                Stmt::Invoke {
                    lhs: None,
                    call: InvokeExp {
                        kind: CallKind::Dynamic,
                        method_ref: MethodRef::new(a, "void m()"),
                        receiver: None,
                        args: vec![],
                    },
                },
            ],
        );
        b.set_entry(main);
        (b.build().unwrap(), main, [a_m, b_m], a)
    }

    #[test]
    fn test_virtual_call_targets_all_overrides() {
        let (program, main, [a_m, b_m], _) = program();
        let cg = ChaBuilder::new(&program).build(main);

        let site = CallSite::new(main, 1);
        assert_eq!(cg.callees_of(site), &[a_m, b_m]);
        assert_eq!(cg.reachable_methods(), &[main, a_m, b_m]);
        assert!(cg.edges_out_of(site).all(|e| e.kind == CallKind::Virtual));
    }

    #[test]
    fn test_dynamic_call_has_no_target() {
        let (program, main, _, _) = program();
        let cg = ChaBuilder::new(&program).build(main);
        assert!(cg.callees_of(CallSite::new(main, 2)).is_empty());
    }

    #[test]
    fn test_special_call_single_target() {
        let (program, _, [a_m, _], a) = program();
        let call = InvokeExp::new_instance(
            CallKind::Special,
            MethodRef::new(a, "void m()"),
            VarId(0),
            vec![],
        );
        assert_eq!(ChaBuilder::new(&program).resolve(&call), vec![a_m]);
    }
}

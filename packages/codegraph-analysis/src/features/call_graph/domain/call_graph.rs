//! Call graph
//!
//! Entry methods, the set of reachable methods, and the `(call site, callee)`
//! edges between them. Both sets only grow; adding an existing edge or an
//! already reachable method is a no-op that reports `false`.

use crate::shared::models::{CallKind, MethodId, Program, StmtRef};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Position of an invoke statement
pub type CallSite = StmtRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallEdge {
    pub kind: CallKind,
    pub call_site: CallSite,
    pub callee: MethodId,
}

impl CallEdge {
    pub fn new(kind: CallKind, call_site: CallSite, callee: MethodId) -> Self {
        Self {
            kind,
            call_site,
            callee,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CallGraph {
    entry_methods: Vec<MethodId>,
    /// Reachable methods in discovery order
    reachable: Vec<MethodId>,
    edges: Vec<CallEdge>,

    #[serde(skip)]
    reachable_set: FxHashSet<MethodId>,
    #[serde(skip)]
    edge_set: FxHashSet<(CallSite, MethodId)>,
    #[serde(skip)]
    callees: FxHashMap<CallSite, Vec<MethodId>>,
    #[serde(skip)]
    callers: FxHashMap<MethodId, Vec<CallSite>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry_method(&mut self, method: MethodId) {
        if !self.entry_methods.contains(&method) {
            self.entry_methods.push(method);
        }
    }

    /// Returns true if `method` was not reachable before
    pub fn add_reachable_method(&mut self, method: MethodId) -> bool {
        if self.reachable_set.insert(method) {
            self.reachable.push(method);
            true
        } else {
            false
        }
    }

    /// Returns true if the `(call site, callee)` pair is new
    pub fn add_edge(&mut self, edge: CallEdge) -> bool {
        if !self.edge_set.insert((edge.call_site, edge.callee)) {
            return false;
        }
        self.callees
            .entry(edge.call_site)
            .or_default()
            .push(edge.callee);
        self.callers
            .entry(edge.callee)
            .or_default()
            .push(edge.call_site);
        self.edges.push(edge);
        true
    }

    pub fn entry_methods(&self) -> &[MethodId] {
        &self.entry_methods
    }

    pub fn reachable_methods(&self) -> &[MethodId] {
        &self.reachable
    }

    #[inline]
    pub fn is_reachable(&self, method: MethodId) -> bool {
        self.reachable_set.contains(&method)
    }

    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn has_edge(&self, call_site: CallSite, callee: MethodId) -> bool {
        self.edge_set.contains(&(call_site, callee))
    }

    pub fn callees_of(&self, call_site: CallSite) -> &[MethodId] {
        self.callees
            .get(&call_site)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn callers_of(&self, method: MethodId) -> &[CallSite] {
        self.callers
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn edges_out_of(&self, call_site: CallSite) -> impl Iterator<Item = &CallEdge> + '_ {
        self.edges.iter().filter(move |e| e.call_site == call_site)
    }

    /// Every invoke statement in `method`'s body, resolved or not
    pub fn call_sites_in(&self, program: &Program, method: MethodId) -> Vec<CallSite> {
        program
            .body(method)
            .map(|body| body.call_sites().map(|i| CallSite::new(method, i)).collect())
            .unwrap_or_default()
    }
}

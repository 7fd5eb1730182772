//! Per-node data-flow facts

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// In/out facts of every node reached by the solver
#[derive(Debug, Clone)]
pub struct DataflowResult<N, F> {
    in_facts: FxHashMap<N, F>,
    out_facts: FxHashMap<N, F>,
}

impl<N: Copy + Eq + Hash, F> Default for DataflowResult<N, F> {
    fn default() -> Self {
        Self {
            in_facts: FxHashMap::default(),
            out_facts: FxHashMap::default(),
        }
    }
}

impl<N: Copy + Eq + Hash, F> DataflowResult<N, F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_fact(&self, node: N) -> Option<&F> {
        self.in_facts.get(&node)
    }

    pub fn out_fact(&self, node: N) -> Option<&F> {
        self.out_facts.get(&node)
    }

    pub fn set_in_fact(&mut self, node: N, fact: F) {
        self.in_facts.insert(node, fact);
    }

    pub fn set_out_fact(&mut self, node: N, fact: F) {
        self.out_facts.insert(node, fact);
    }

    pub(crate) fn take_in_fact(&mut self, node: N) -> Option<F> {
        self.in_facts.remove(&node)
    }

    pub(crate) fn take_out_fact(&mut self, node: N) -> Option<F> {
        self.out_facts.remove(&node)
    }

    pub(crate) fn in_fact_mut(&mut self, node: N) -> Option<&mut F> {
        self.in_facts.get_mut(&node)
    }

    pub(crate) fn out_fact_mut(&mut self, node: N) -> Option<&mut F> {
        self.out_facts.get_mut(&node)
    }

    pub fn len(&self) -> usize {
        self.out_facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out_facts.is_empty()
    }
}

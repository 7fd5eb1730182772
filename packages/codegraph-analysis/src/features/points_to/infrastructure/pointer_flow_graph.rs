//! Pointer Flow Graph (PFG)
//!
//! Nodes are pointers, an edge `s → t` means every object pointed to by `s`
//! flows to `t`. Each node carries its points-to set.
//!
//! Pointers are interned: the same logical pointer always maps to the same
//! `PointerId`, created lazily on first reference. Nodes and edges are never
//! removed.

use crate::features::points_to::domain::{ObjId, Pointer, PointsToSet};
use crate::shared::models::{FieldId, VarId};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::FxHashMap;

/// Handle of a pointer node
pub type PointerId = NodeIndex;

#[derive(Debug, Default)]
pub struct PointerFlowGraph {
    /// Graph (pointer nodes + flow edges)
    graph: DiGraph<Pointer, ()>,

    /// Points-to set per node, indexed by `PointerId::index()`
    points_to: Vec<PointsToSet>,

    /// Pointer → node index
    index: FxHashMap<Pointer, PointerId>,
}

impl PointerFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for `pointer`
    pub fn get_or_create(&mut self, pointer: Pointer) -> PointerId {
        if let Some(&id) = self.index.get(&pointer) {
            return id;
        }
        let id = self.graph.add_node(pointer);
        self.points_to.push(PointsToSet::new());
        self.index.insert(pointer, id);
        id
    }

    #[inline]
    pub fn var_ptr(&mut self, var: VarId) -> PointerId {
        self.get_or_create(Pointer::Var(var))
    }

    #[inline]
    pub fn static_field(&mut self, field: FieldId) -> PointerId {
        self.get_or_create(Pointer::StaticField(field))
    }

    #[inline]
    pub fn instance_field(&mut self, obj: ObjId, field: FieldId) -> PointerId {
        self.get_or_create(Pointer::InstanceField(obj, field))
    }

    #[inline]
    pub fn array_index(&mut self, obj: ObjId) -> PointerId {
        self.get_or_create(Pointer::ArrayIndex(obj))
    }

    /// Existing node for `pointer`, without creating one
    pub fn lookup(&self, pointer: Pointer) -> Option<PointerId> {
        self.index.get(&pointer).copied()
    }

    #[inline]
    pub fn pointer(&self, id: PointerId) -> Pointer {
        self.graph[id]
    }

    #[inline]
    pub fn points_to(&self, id: PointerId) -> &PointsToSet {
        &self.points_to[id.index()]
    }

    #[inline]
    pub(crate) fn points_to_mut(&mut self, id: PointerId) -> &mut PointsToSet {
        &mut self.points_to[id.index()]
    }

    /// Returns true if the edge is new
    pub fn add_edge(&mut self, src: PointerId, dst: PointerId) -> bool {
        if self.graph.contains_edge(src, dst) {
            return false;
        }
        self.graph.add_edge(src, dst, ());
        true
    }

    pub fn has_edge(&self, src: PointerId, dst: PointerId) -> bool {
        self.graph.contains_edge(src, dst)
    }

    pub fn succs_of(&self, id: PointerId) -> impl Iterator<Item = PointerId> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    pub fn pointers(&self) -> impl Iterator<Item = (PointerId, Pointer)> + '_ {
        self.graph
            .node_indices()
            .map(move |id| (id, self.graph[id]))
    }

    pub fn pointer_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

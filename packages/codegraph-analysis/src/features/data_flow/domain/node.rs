//! ICFG nodes and edges

use crate::shared::models::MethodId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Synthetic node before the first statement
    Entry,
    Stmt(usize),
    /// Synthetic node every return flows into
    Exit,
}

/// A node of a method's CFG, unique program-wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub method: MethodId,
    pub kind: NodeKind,
}

impl NodeId {
    #[inline]
    pub fn entry(method: MethodId) -> Self {
        Self {
            method,
            kind: NodeKind::Entry,
        }
    }

    #[inline]
    pub fn stmt(method: MethodId, index: usize) -> Self {
        Self {
            method,
            kind: NodeKind::Stmt(index),
        }
    }

    #[inline]
    pub fn exit(method: MethodId) -> Self {
        Self {
            method,
            kind: NodeKind::Exit,
        }
    }

    /// Statement index, `None` for entry and exit
    #[inline]
    pub fn stmt_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Stmt(i) => Some(i),
            _ => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Entry => write!(f, "{}:entry", self.method),
            NodeKind::Stmt(i) => write!(f, "{}:{}", self.method, i),
            NodeKind::Exit => write!(f, "{}:exit", self.method),
        }
    }
}

/// Intraprocedural edge kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CfgEdgeKind {
    Entry,
    FallThrough,
    Goto,
    IfTrue,
    IfFalse,
    SwitchCase(i32),
    SwitchDefault,
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IcfgEdgeKind {
    Normal(CfgEdgeKind),
    /// Call node → return site, bypassing the callee
    CallToReturn,
    /// Call node → callee entry
    Call,
    /// Callee exit → return site
    Return,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IcfgEdge<N> {
    pub source: N,
    pub target: N,
    pub kind: IcfgEdgeKind,
    /// Originating call node for call, call-to-return and return edges
    pub call_site: Option<N>,
}

impl<N> IcfgEdge<N> {
    pub fn normal(source: N, target: N, kind: CfgEdgeKind) -> Self {
        Self {
            source,
            target,
            kind: IcfgEdgeKind::Normal(kind),
            call_site: None,
        }
    }
}

//! Pointers: the nodes of the pointer flow graph

use super::abstract_object::ObjId;
use crate::shared::models::{FieldId, VarId};
use std::fmt;

/// Anything that may hold a reference.
///
/// Variables are unique program-wide, so `Var` needs no method qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pointer {
    Var(VarId),
    StaticField(FieldId),
    /// `o.f`
    InstanceField(ObjId, FieldId),
    /// `o[*]`: all elements of an array object collapse into one pointer
    ArrayIndex(ObjId),
}

impl Pointer {
    #[inline]
    pub fn as_var(&self) -> Option<VarId> {
        match self {
            Pointer::Var(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pointer::Var(v) => write!(f, "{}", v),
            Pointer::StaticField(field) => write!(f, "static.{}", field),
            Pointer::InstanceField(o, field) => write!(f, "{}.{}", o, field),
            Pointer::ArrayIndex(o) => write!(f, "{}[*]", o),
        }
    }
}

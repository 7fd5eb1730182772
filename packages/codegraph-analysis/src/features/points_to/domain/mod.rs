//! Domain models for Points-to Analysis
//!
//! Core abstractions independent of the solver:
//! - Obj: abstract heap object (allocation-site abstraction)
//! - Pointer: variable, static field, instance field or array element
//! - PointsToSet: monotone set of objects

pub mod abstract_object;
pub mod pointer;
pub mod points_to_set;

pub use abstract_object::{AllocSite, Obj, ObjId, ObjectFactory};
pub use pointer::Pointer;
pub use points_to_set::PointsToSet;

//! # Constant Propagation
//!
//! Forward must-analysis on the flat lattice `UNDEF ⊒ c ⊒ NAC` for
//! int-holding variables, built on the data-flow framework.

pub mod domain;
pub mod infrastructure;

pub use domain::{CpFact, Value};
pub use infrastructure::{ConstantPropagation, InterConstantPropagation};

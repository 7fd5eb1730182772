//! Constant propagation analyses
//!
//! - **ConstantPropagation**: one method at a time, parameters are `NAC`
//! - **InterConstantPropagation**: whole program over the ICFG

pub mod analysis;
pub mod inter;

pub use analysis::ConstantPropagation;
pub use inter::InterConstantPropagation;

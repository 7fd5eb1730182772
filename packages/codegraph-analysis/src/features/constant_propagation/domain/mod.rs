//! Domain models for constant propagation

pub mod fact;
pub mod value;

pub use fact::CpFact;
pub use value::Value;

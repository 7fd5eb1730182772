//! # Dead Code Detection
//!
//! Combines constant propagation and live variables over a method CFG:
//! - **unreachable code**: statements never visited when branches with a
//!   constant condition only follow the taken edge
//! - **dead assignments**: side-effect free assignments to a variable that
//!   is not live afterwards

pub mod infrastructure;

pub use infrastructure::DeadCodeDetection;

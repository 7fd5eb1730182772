//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure analysis state (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Solvers and builders
//!
//! Dependency order: `data_flow` and `call_graph` are leaves, `points_to`
//! produces a call graph, the remaining analyses run on `data_flow`.

pub mod call_graph;
pub mod data_flow;
pub mod points_to;

pub mod constant_propagation;
pub mod dead_code;
pub mod liveness;

/*
 * Codegraph Analysis - Whole-Program Static Analysis Core
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : IR model (Program, MethodBody, Stmt, Exp) and class hierarchy
 * - features/    : Vertical slices (points_to → call_graph → data_flow →
 *                  constant_propagation / liveness → dead_code)
 * - pipeline/    : Orchestration
 * - config/      : YAML-loadable analysis configuration
 *
 * Single-threaded, deterministic: every worklist is FIFO and every result
 * map iterates in a stable order.
 */

// Crate-level lint configuration
#![allow(clippy::type_complexity)] // Generic solver signatures
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared IR models
pub mod shared;

/// Feature modules (pointer analysis, call graph, data-flow analyses)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::AnalysisConfig;
pub use errors::{AnalysisError, Result};
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use shared::models::{Program, ProgramBuilder};

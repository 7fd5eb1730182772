//! Section-specific configuration types
//!
//! Each analysis stage has its own configuration struct with validation.

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

// ============================================================================
// Call Graph Construction
// ============================================================================

/// Algorithm used to build the call graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallGraphAlgorithm {
    /// On-the-fly construction driven by the points-to analysis
    #[default]
    Pta,
    /// Class hierarchy analysis, declared receiver types only
    Cha,
}

/// Call graph configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallGraphConfig {
    /// Construction algorithm
    pub algorithm: CallGraphAlgorithm,

    /// Entry method override, written `<Class: subsignature>`.
    /// When absent the program's own entry method is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl CallGraphConfig {
    /// Builder: Set algorithm
    pub fn algorithm(mut self, v: CallGraphAlgorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Builder: Set entry signature
    pub fn entry(mut self, v: impl Into<String>) -> Self {
        self.entry = Some(v.into());
        self
    }
}

impl Validatable for CallGraphConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(entry) = &self.entry {
            let well_formed = entry.starts_with('<')
                && entry.ends_with('>')
                && entry.contains(": ")
                && entry.len() > 4;
            if !well_formed {
                return Err(ConfigError::Validation(format!(
                    "entry '{}' must have the form '<Class: subsignature>'",
                    entry
                )));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "CallGraphConfig"
    }
}

// ============================================================================
// Pointer Analysis
// ============================================================================

/// Heap abstraction used by the pointer analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeapModelKind {
    /// One abstract object per allocation site
    #[default]
    AllocationSite,
    /// One abstract object per allocated type
    TypeBased,
}

/// Pointer analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PtaConfig {
    /// Heap abstraction
    pub heap_model: HeapModelKind,
}

impl PtaConfig {
    /// Builder: Set heap model
    pub fn heap_model(mut self, v: HeapModelKind) -> Self {
        self.heap_model = v;
        self
    }
}

impl Validatable for PtaConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "PtaConfig"
    }
}

// ============================================================================
// Constant Propagation
// ============================================================================

/// Constant propagation configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstPropConfig {
    /// Propagate constants across call/return edges of the ICFG
    pub inter_procedural: bool,
}

impl ConstPropConfig {
    /// Builder: Set inter_procedural
    pub fn inter_procedural(mut self, v: bool) -> Self {
        self.inter_procedural = v;
        self
    }
}

impl Validatable for ConstPropConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "ConstPropConfig"
    }
}

// ============================================================================
// Dead Code Detection
// ============================================================================

/// Dead code detection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeadCodeConfig {
    /// Run dead code detection on every reachable method
    pub enabled: bool,
}

impl Default for DeadCodeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl DeadCodeConfig {
    /// Builder: Set enabled
    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }
}

impl Validatable for DeadCodeConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "DeadCodeConfig"
    }
}

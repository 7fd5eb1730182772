//! Analysis configuration
//!
//! One [`AnalysisConfig`] per run, split into sections:
//! - `call_graph`: construction algorithm and optional entry override
//! - `pta`: heap abstraction
//! - `constprop`: intra- or inter-procedural constant propagation
//! - `dead_code`: whether to run dead code detection
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_analysis::config::{AnalysisConfig, CallGraphAlgorithm};
//!
//! let config = AnalysisConfig::default()
//!     .call_graph(|c| c.algorithm(CallGraphAlgorithm::Cha));
//!
//! let config = AnalysisConfig::from_yaml("analysis.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod stage_configs;
pub mod validation;

pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use stage_configs::{
    CallGraphAlgorithm, CallGraphConfig, ConstPropConfig, DeadCodeConfig, HeapModelKind, PtaConfig,
};
pub use validation::Validatable;

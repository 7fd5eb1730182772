//! Pipeline result types

use crate::config::CallGraphAlgorithm;
use crate::errors::Result;
use crate::features::call_graph::CallGraph;
use crate::features::constant_propagation::Value;
use crate::features::points_to::{PointerAnalysisResult, PtaStats};
use crate::shared::models::{MethodId, VarId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-method analysis output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodReport {
    pub method: MethodId,
    pub signature: String,
    /// Constant facts flowing into the method exit
    pub exit_constants: BTreeMap<VarId, Value>,
    /// Sorted dead statement indices; empty when dead code detection is off
    pub dead_code: BTreeSet<usize>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub algorithm: CallGraphAlgorithm,
    pub call_graph: CallGraph,
    /// Present only for the points-to call graph
    #[serde(skip)]
    pub points_to: Option<PointerAnalysisResult>,
    pub pta_stats: Option<PtaStats>,
    /// Reachable methods with a body, in discovery order
    pub methods: Vec<MethodReport>,
}

impl AnalysisReport {
    pub fn method(&self, method: MethodId) -> Option<&MethodReport> {
        self.methods.iter().find(|r| r.method == method)
    }

    pub fn dead_code_of(&self, method: MethodId) -> Option<&BTreeSet<usize>> {
        self.method(method).map(|r| &r.dead_code)
    }

    pub fn constants_of(&self, method: MethodId) -> Option<&BTreeMap<VarId, Value>> {
        self.method(method).map(|r| &r.exit_constants)
    }

    /// Total dead statements across all methods
    pub fn dead_code_count(&self) -> usize {
        self.methods.iter().map(|r| r.dead_code.len()).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

//! Pipeline orchestrator
//!
//! Coordinates the analysis features into one run over a program.

use super::result::{AnalysisReport, MethodReport};
use crate::config::{AnalysisConfig, CallGraphAlgorithm, Validatable};
use crate::errors::{AnalysisError, Result};
use crate::features::call_graph::{CallGraph, ChaBuilder};
use crate::features::constant_propagation::{
    ConstantPropagation, CpFact, InterConstantPropagation,
};
use crate::features::data_flow::{Cfg, ProgramIcfg};
use crate::features::dead_code::DeadCodeDetection;
use crate::features::liveness::LiveVariableAnalysis;
use crate::features::points_to::{PointerAnalysisResult, PointerAnalyzer};
use crate::shared::models::{MethodId, Program};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

/// Analysis pipeline
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every configured stage on `program`
    pub fn run(&self, program: &Program) -> Result<AnalysisReport> {
        let start = Instant::now();
        self.config.validate()?;
        let entry = self.resolve_entry(program)?;
        info!(
            "Analysis pipeline start: entry {}, {:?} call graph",
            program.signature(entry),
            self.config.call_graph.algorithm
        );

        // Stage 1: call graph
        let (call_graph, points_to) = self.build_call_graph(program, entry)?;

        let methods: Vec<MethodId> = call_graph
            .reachable_methods()
            .iter()
            .copied()
            .filter(|&m| program.body(m).is_some())
            .collect();

        // Stage 2: constant propagation
        let inter = if self.config.constprop.inter_procedural {
            let icfg = ProgramIcfg::build(program, &call_graph)?;
            Some(InterConstantPropagation::new(program, &icfg).analyze())
        } else {
            None
        };

        // Stage 3: live variables + dead code, per method
        let mut reports = Vec::with_capacity(methods.len());
        for method in methods {
            let (cfg, intra) = match &inter {
                Some(_) => (Cfg::build(program, method)?, None),
                None => {
                    let (cfg, result) = ConstantPropagation::new(program).analyze(method)?;
                    (cfg, Some(result))
                }
            };
            let Some(constants) = intra.as_ref().or(inter.as_ref()) else {
                continue;
            };

            let exit_constants = constants
                .in_fact(cfg.exit())
                .map(CpFact::to_sorted)
                .unwrap_or_default();

            let dead_code = if self.config.dead_code.enabled {
                let live = LiveVariableAnalysis::new(program).analyze_cfg(&cfg);
                DeadCodeDetection::new(program).detect(&cfg, constants, &live)
            } else {
                BTreeSet::new()
            };

            debug!(
                "{}: {} constants at exit, {} dead statements",
                program.signature(method),
                exit_constants.len(),
                dead_code.len()
            );
            reports.push(MethodReport {
                method,
                signature: program.signature(method),
                exit_constants,
                dead_code,
            });
        }

        let report = AnalysisReport {
            algorithm: self.config.call_graph.algorithm,
            pta_stats: points_to.as_ref().map(|r| r.stats().clone()),
            call_graph,
            points_to,
            methods: reports,
        };
        info!(
            "Analysis pipeline complete: {} methods, {} call edges, {} dead statements in {:.2}ms",
            report.methods.len(),
            report.call_graph.num_edges(),
            report.dead_code_count(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(report)
    }

    /// Configured entry signature, else the program's entry method
    fn resolve_entry(&self, program: &Program) -> Result<MethodId> {
        match &self.config.call_graph.entry {
            Some(signature) => program
                .method_by_signature(signature)
                .ok_or_else(|| AnalysisError::EntryNotFound(signature.clone())),
            None => program.entry_method().ok_or(AnalysisError::NoEntryMethod),
        }
    }

    fn build_call_graph(
        &self,
        program: &Program,
        entry: MethodId,
    ) -> Result<(CallGraph, Option<PointerAnalysisResult>)> {
        match self.config.call_graph.algorithm {
            CallGraphAlgorithm::Cha => Ok((ChaBuilder::new(program).build(entry), None)),
            CallGraphAlgorithm::Pta => {
                let result = PointerAnalyzer::new(self.config.pta.clone())
                    .with_entry(entry)
                    .analyze(program)?;
                Ok((result.call_graph().clone(), Some(result)))
            }
        }
    }
}

//! The evaluation engine: schedules every node, evaluates it once against the
//! event record, and reduces the results into a [`DryTestResult`].

mod aggregate;
mod context;
mod result;

pub use result::{
    DetailedDistribution, DryTestResult, EvaluationLogEntry, EvaluationStatus,
    OverallProgramResult,
};

use crate::error::DryTestError;
use crate::graph::{DependencyGraph, Scheduler};
use crate::program::{EventData, ProgramDefinition};
use aggregate::Aggregator;
use context::EvaluationContext;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which node results make up `totalCalculatedPoints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregationPolicy {
    /// Sum of the emitted `detailedDistributions` amounts.
    #[default]
    Distributions,
    /// Sum of numeric results of nodes with no incoming edges.
    RootNodes,
    /// Sum of numeric results of every evaluated node.
    AllNodes,
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    pub aggregation: AggregationPolicy,
}

impl EngineOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Runs dry tests. Holds only configuration, so one engine can serve any
/// number of runs, including concurrent ones.
#[derive(Debug, Clone, Default)]
pub struct DryTestEngine {
    options: EngineOptions,
}

#[derive(Debug, Clone, Default)]
pub struct DryTestEngineBuilder {
    options: EngineOptions,
}

impl DryTestEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregation(mut self, policy: AggregationPolicy) -> Self {
        self.options.aggregation = policy;
        self
    }

    /// Replaces every option at once, e.g. with a set loaded from a file.
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> DryTestEngine {
        DryTestEngine {
            options: self.options,
        }
    }
}

impl DryTestEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn builder() -> DryTestEngineBuilder {
        DryTestEngineBuilder::new()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Evaluates `program` against `event`.
    ///
    /// A circular dependency aborts the run before any node is evaluated.
    /// Every other defect is contained to the node that has it.
    pub fn run(
        &self,
        program: &ProgramDefinition,
        event: &EventData,
    ) -> Result<DryTestResult, DryTestError> {
        let graph = DependencyGraph::build(program);
        let order = Scheduler::new(&graph).order()?;

        let mut context = EvaluationContext::new(graph, event);
        for index in order {
            context.evaluate(index);
        }

        let result = Aggregator::new(self.options.aggregation).aggregate(context);
        info!(
            nodes = result.evaluation_log.len(),
            distributions = result.detailed_distributions.len(),
            total_points = result.overall_program_result.total_calculated_points,
            triggered = result.overall_program_result.triggered,
            aggregation = ?self.options.aggregation,
            "dry test completed"
        );
        Ok(result)
    }
}

/// Runs a dry test with default options.
pub fn dry_test_program(
    program: &ProgramDefinition,
    event: &EventData,
) -> Result<DryTestResult, DryTestError> {
    DryTestEngine::default().run(program, event)
}

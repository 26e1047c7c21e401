use super::result::{EvaluationLogEntry, EvaluationStatus};
use crate::error::NodeEvaluationError;
use crate::evaluator::{
    ConstraintEvaluator, DistributionEvaluator, OperatorEvaluator, RuleEvaluator,
};
use crate::graph::DependencyGraph;
use crate::program::{EventData, NodeKind, ProgramNode};
use crate::value::Value;
use tracing::debug;

/// Per-node bookkeeping for a single run.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeEvaluationState {
    pub result: Value,
    pub evaluated: bool,
}

/// The isolated state of one dry test: node results and the audit log.
///
/// Created fresh for every run and consumed by the aggregator.
pub(crate) struct EvaluationContext<'a> {
    graph: DependencyGraph<'a>,
    event: &'a EventData,
    states: Vec<NodeEvaluationState>,
    log: Vec<EvaluationLogEntry>,
}

struct NodeOutcome {
    value: Value,
    status: EvaluationStatus,
    details: String,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(graph: DependencyGraph<'a>, event: &'a EventData) -> Self {
        let states = vec![NodeEvaluationState::default(); graph.len()];
        let log = Vec::with_capacity(graph.len());
        Self {
            graph,
            event,
            states,
            log,
        }
    }

    pub fn graph(&self) -> &DependencyGraph<'a> {
        &self.graph
    }

    pub fn state(&self, index: usize) -> &NodeEvaluationState {
        &self.states[index]
    }

    pub fn into_log(self) -> Vec<EvaluationLogEntry> {
        self.log
    }

    /// Evaluates the node at `index`, caching its result and appending its
    /// log entry. Callers must visit nodes in scheduler order so that every
    /// dependency is already cached; a node already evaluated is left alone.
    pub fn evaluate(&mut self, index: usize) {
        if self.states[index].evaluated {
            return;
        }
        let node = &self.graph.program().nodes[index];
        let dependencies: Vec<Value> = self
            .graph
            .dependencies(index)
            .iter()
            .map(|&dep| self.states[dep].result.clone())
            .collect();

        let outcome = evaluate_node(node, &dependencies, self.event).unwrap_or_else(|err| {
            NodeOutcome {
                value: Value::Null,
                status: EvaluationStatus::Skipped,
                details: format!("Evaluation error: {}", err),
            }
        });
        debug!(
            node_id = %node.id,
            node_type = node.type_name(),
            status = %outcome.status,
            result = %outcome.value,
            "node evaluated"
        );

        let state = &mut self.states[index];
        state.result = outcome.value.clone();
        state.evaluated = true;

        let label = if node.label.is_empty() {
            "Unknown".to_string()
        } else {
            node.label.clone()
        };
        self.log.push(EvaluationLogEntry {
            node_id: node.id.clone(),
            node_label: label,
            node_type: node.type_name().to_string(),
            evaluation_status: outcome.status,
            result_value: outcome.value,
            details: outcome.details,
        });
    }
}

/// Dispatches to the evaluator for the node's type.
fn evaluate_node(
    node: &ProgramNode,
    dependencies: &[Value],
    event: &EventData,
) -> Result<NodeOutcome, NodeEvaluationError> {
    let inactive = if node.is_active {
        ""
    } else {
        " (Node is inactive)"
    };

    let outcome = match &node.kind {
        NodeKind::Constraint(data) => {
            let passed = ConstraintEvaluator::evaluate(data, node.is_active, event);
            let mut details = format!(
                "Constraint {}{}",
                if passed { "passed" } else { "failed" },
                inactive
            );
            if node.is_active {
                if let Some(explanation) = ConstraintEvaluator::explain(data, event) {
                    details.push_str(": ");
                    details.push_str(&explanation);
                }
            }
            NodeOutcome {
                value: Value::Bool(passed),
                status: matched(passed),
                details,
            }
        }
        NodeKind::Rule(data) => {
            let activated = RuleEvaluator::evaluate(data, node.is_active, dependencies);
            NodeOutcome {
                value: Value::Bool(activated),
                status: matched(activated),
                details: format!(
                    "Rule {}{}",
                    if activated { "activated" } else { "not activated" },
                    inactive
                ),
            }
        }
        NodeKind::Operator(data) => {
            let value = OperatorEvaluator::evaluate(data, node.is_active, dependencies)?;
            NodeOutcome {
                details: format!("Operator result: {}{}", value, inactive),
                value,
                status: EvaluationStatus::Evaluated,
            }
        }
        NodeKind::Distribution(data) => {
            let amount =
                DistributionEvaluator::evaluate(data, node.is_active, dependencies, event)?;
            let value = Value::Number(amount);
            NodeOutcome {
                details: format!("Distribution calculated: {}{}", value, inactive),
                value,
                status: EvaluationStatus::Evaluated,
            }
        }
        NodeKind::Unrecognized { type_name } => NodeOutcome {
            value: Value::Null,
            status: EvaluationStatus::Skipped,
            details: format!("Unknown node type: {}", type_name),
        },
    };
    Ok(outcome)
}

fn matched(result: bool) -> EvaluationStatus {
    if result {
        EvaluationStatus::Matched
    } else {
        EvaluationStatus::NotMatched
    }
}

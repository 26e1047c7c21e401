use super::AggregationPolicy;
use super::context::EvaluationContext;
use super::result::{DetailedDistribution, DryTestResult, OverallProgramResult};
use crate::program::NodeKind;
use crate::value::Value;

const UNKNOWN_RULE_ID: &str = "unknown";
const UNKNOWN_RULE_LABEL: &str = "Unknown Rule";
const UNKNOWN_DISTRIBUTION_TYPE: &str = "unknown";

/// Reduces per-node results into the final report.
pub(crate) struct Aggregator {
    policy: AggregationPolicy,
}

impl Aggregator {
    pub fn new(policy: AggregationPolicy) -> Self {
        Self { policy }
    }

    pub fn aggregate(&self, context: EvaluationContext<'_>) -> DryTestResult {
        let detailed_distributions = Self::detailed_distributions(&context);
        let total_calculated_points = match self.policy {
            AggregationPolicy::Distributions => detailed_distributions
                .iter()
                .map(|d| d.calculated_amount)
                .sum(),
            AggregationPolicy::RootNodes => {
                Self::numeric_sum(&context, context.graph().roots().into_iter())
            }
            AggregationPolicy::AllNodes => Self::numeric_sum(&context, 0..context.graph().len()),
        };

        DryTestResult {
            overall_program_result: OverallProgramResult {
                triggered: total_calculated_points > 0.0,
                total_calculated_points,
            },
            detailed_distributions,
            evaluation_log: context.into_log(),
        }
    }

    /// Every distribution whose result is a positive number, in input order.
    fn detailed_distributions(context: &EvaluationContext<'_>) -> Vec<DetailedDistribution> {
        let graph = context.graph();
        let program = graph.program();
        program
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let NodeKind::Distribution(data) = &node.kind else {
                    return None;
                };
                let state = context.state(index);
                let amount = match state.result {
                    Value::Number(n) if state.evaluated && n > 0.0 => n,
                    _ => return None,
                };

                // First direct rule dependency that fired.
                let rule = graph.dependencies(index).iter().find_map(|&dep| {
                    let dep_node = &program.nodes[dep];
                    let fired = matches!(dep_node.kind, NodeKind::Rule(_))
                        && context.state(dep).evaluated
                        && context.state(dep).result.is_truthy();
                    fired.then_some(dep_node)
                });

                Some(DetailedDistribution {
                    distribution_id: node.id.clone(),
                    distribution_label: node.label.clone(),
                    distribution_type: data
                        .distribution_type
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_DISTRIBUTION_TYPE.to_string()),
                    calculated_amount: amount,
                    triggered_by_rule_id: rule
                        .map_or(UNKNOWN_RULE_ID, |r| r.id.as_str())
                        .to_string(),
                    triggered_by_rule_label: rule
                        .map_or(UNKNOWN_RULE_LABEL, |r| r.label.as_str())
                        .to_string(),
                    conditions_met: true,
                })
            })
            .collect()
    }

    fn numeric_sum(context: &EvaluationContext<'_>, indices: impl Iterator<Item = usize>) -> f64 {
        indices
            .filter_map(|i| match context.state(i).result {
                Value::Number(n) => Some(n),
                _ => None,
            })
            .sum()
    }
}

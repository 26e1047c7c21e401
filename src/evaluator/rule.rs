use crate::program::{RuleData, RuleType, Setting};
use crate::value::Value;
use tracing::trace;

/// Gatekeeper nodes: reduce dependency results to one activation signal.
pub struct RuleEvaluator;

impl RuleEvaluator {
    pub fn evaluate(data: &RuleData, is_active: bool, dependencies: &[Value]) -> bool {
        if !is_active {
            trace!("rule inactive");
            return false;
        }
        let Setting::Known(rule_type) = &data.rule_type else {
            trace!(rule_type = ?data.rule_type, "rule has no usable type");
            return false;
        };

        let results: Vec<&Value> = dependencies.iter().filter(|v| !v.is_null()).collect();
        let activated = match rule_type {
            RuleType::Conditional => results.iter().any(|v| v.is_truthy()),
            RuleType::Threshold => {
                let sum: f64 = results.iter().map(|v| v.as_number()).sum();
                sum >= data.threshold.unwrap_or(0.0)
            }
            RuleType::Sequential => !results.is_empty() && results.iter().all(|v| v.is_truthy()),
        };
        trace!(%rule_type, inputs = results.len(), activated, "rule evaluated");
        activated
    }
}

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome class of a visited node in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    /// A constraint or rule that evaluated to `true`.
    Matched,
    /// A constraint or rule that evaluated to `false`.
    NotMatched,
    /// An operator or distribution that produced a value.
    Evaluated,
    /// A node that could not be evaluated (unknown type or evaluator error).
    Skipped,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Matched => "MATCHED",
            EvaluationStatus::NotMatched => "NOT_MATCHED",
            EvaluationStatus::Evaluated => "EVALUATED",
            EvaluationStatus::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry per visited node, in visitation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationLogEntry {
    pub node_id: String,
    pub node_label: String,
    pub node_type: String,
    pub evaluation_status: EvaluationStatus,
    pub result_value: Value,
    pub details: String,
}

/// A distribution that awarded points, with the rule that let it fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedDistribution {
    pub distribution_id: String,
    pub distribution_label: String,
    pub distribution_type: String,
    pub calculated_amount: f64,
    pub triggered_by_rule_id: String,
    pub triggered_by_rule_label: String,
    pub conditions_met: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallProgramResult {
    pub triggered: bool,
    pub total_calculated_points: f64,
}

/// The complete report of a dry test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryTestResult {
    pub overall_program_result: OverallProgramResult,
    pub detailed_distributions: Vec<DetailedDistribution>,
    pub evaluation_log: Vec<EvaluationLogEntry>,
}

impl DryTestResult {
    /// The log entry recorded for `node_id`, if the node was visited.
    pub fn log_entry(&self, node_id: &str) -> Option<&EvaluationLogEntry> {
        self.evaluation_log.iter().find(|e| e.node_id == node_id)
    }

    /// The cached result of `node_id`, if the node was visited.
    pub fn node_result(&self, node_id: &str) -> Option<&Value> {
        self.log_entry(node_id).map(|e| &e.result_value)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

//! Static checks over a program graph.
//!
//! Validation reports on the shape and configuration of a program without
//! evaluating it. It never blocks a dry test: the engine tolerates every
//! defect reported here except a circular dependency.

use crate::graph::{DependencyGraph, Scheduler};
use crate::program::{
    ComparisonOperator, ConstraintData, DistributionData, NodeKind, OperatorData,
    PointMappingType, ProgramDefinition, ProgramNode, RuleData, Setting,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
        let summary = ValidationSummary {
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            info: count(Severity::Info),
        };
        Self {
            is_valid: summary.errors == 0,
            issues,
            summary,
        }
    }

    /// Issues of the given severity, in report order.
    pub fn issues_of(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

/// Runs every structural and configuration check over `program`.
pub fn validate_program(program: &ProgramDefinition) -> ValidationReport {
    let mut checks = Checks::default();
    if program.nodes.is_empty() {
        checks.push(Severity::Warning, "Program has no nodes".to_string());
        return ValidationReport::from_issues(checks.issues);
    }

    let graph = DependencyGraph::build(program);
    checks.structure(&graph);
    for node in &program.nodes {
        checks.node(node);
    }
    let components = graph.components().len();
    if components > 1 {
        checks.push(
            Severity::Warning,
            format!("Program contains {} disconnected components", components),
        );
    }
    ValidationReport::from_issues(checks.issues)
}

#[derive(Default)]
struct Checks {
    issues: Vec<ValidationIssue>,
}

impl Checks {
    fn push(&mut self, severity: Severity, message: String) {
        self.issues.push(ValidationIssue {
            severity,
            message,
            node_id: None,
            edge_id: None,
        });
    }

    fn push_node(&mut self, severity: Severity, node: &ProgramNode, message: String) {
        self.issues.push(ValidationIssue {
            severity,
            message,
            node_id: Some(node.id.clone()),
            edge_id: None,
        });
    }

    fn structure(&mut self, graph: &DependencyGraph<'_>) {
        let program = graph.program();

        for edge in graph.dropped_edges() {
            let missing = if program.node(&edge.source).is_none() {
                &edge.source
            } else {
                &edge.target
            };
            self.issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!(
                    "Connection '{}' references missing node '{}'",
                    edge.id, missing
                ),
                node_id: None,
                edge_id: Some(edge.id.clone()),
            });
        }

        for (index, node) in program.nodes.iter().enumerate() {
            if graph.dependencies(index).is_empty() && graph.dependents(index).is_empty() {
                self.push_node(
                    Severity::Warning,
                    node,
                    format!(
                        "Node \"{}\" is not connected to any other node",
                        display_name(node)
                    ),
                );
            }
        }

        if let Err(cycle) = Scheduler::new(graph).order() {
            self.push(
                Severity::Error,
                format!("Program contains circular dependencies: {}", cycle),
            );
        }

        match graph.roots().len() {
            0 => self.push(
                Severity::Error,
                "Program has no entry point (no nodes without incoming connections)".to_string(),
            ),
            1 => {}
            n => self.push(
                Severity::Warning,
                format!("Program has {} entry points, which may cause unexpected behavior", n),
            ),
        }

        if graph.sinks().is_empty() {
            self.push(
                Severity::Warning,
                "Program has no exit point (no nodes without outgoing connections)".to_string(),
            );
        }
    }

    fn node(&mut self, node: &ProgramNode) {
        match &node.kind {
            NodeKind::Constraint(data) => self.constraint(node, data),
            NodeKind::Rule(data) => self.rule(node, data),
            NodeKind::Operator(data) => self.operator(node, data),
            NodeKind::Distribution(data) => self.distribution(node, data),
            NodeKind::Unrecognized { type_name } => self.push_node(
                Severity::Error,
                node,
                format!(
                    "Node \"{}\" has unknown type '{}'",
                    display_name(node),
                    type_name
                ),
            ),
        }

        if !node.is_active {
            self.push_node(
                Severity::Info,
                node,
                format!("Node \"{}\" is inactive", display_name(node)),
            );
        }
    }

    fn setting<T>(&mut self, node: &ProgramNode, kind: &str, what: &str, setting: &Setting<T>) {
        let problem = match setting {
            Setting::Known(_) => return,
            Setting::Missing => format!("has no {} selected", what),
            Setting::Unrecognized(raw) => format!("has an invalid {} '{}'", what, raw),
        };
        self.push_node(
            Severity::Error,
            node,
            format!("{} node \"{}\" {}", kind, display_name(node), problem),
        );
    }

    fn node_error(&mut self, node: &ProgramNode, kind: &str, problem: &str) {
        self.push_node(
            Severity::Error,
            node,
            format!("{} node \"{}\" {}", kind, display_name(node), problem),
        );
    }

    fn constraint(&mut self, node: &ProgramNode, data: &ConstraintData) {
        if data.parameter.is_none() {
            self.node_error(node, "Constraint", "has no parameter defined");
        }
        self.setting(node, "Constraint", "comparison operator", &data.comparison_operator);
        let Some(value) = &data.value else {
            self.node_error(node, "Constraint", "has no value defined");
            return;
        };
        match data.comparison_operator {
            Setting::Known(ComparisonOperator::Between)
                if value.as_list().is_none_or(|items| items.len() < 2) =>
            {
                self.node_error(
                    node,
                    "Constraint",
                    "uses BETWEEN but its value is not a [min, max] list",
                );
            }
            Setting::Known(ComparisonOperator::In) if value.as_list().is_none() => {
                self.node_error(node, "Constraint", "uses IN but its value is not a list");
            }
            _ => {}
        }
    }

    fn rule(&mut self, node: &ProgramNode, data: &RuleData) {
        self.setting(node, "Rule", "rule type", &data.rule_type);
    }

    fn operator(&mut self, node: &ProgramNode, data: &OperatorData) {
        self.setting(node, "Operator", "operator type", &data.operator_type);
    }

    fn distribution(&mut self, node: &ProgramNode, data: &DistributionData) {
        self.setting(node, "Distribution", "point mapping type", &data.point_mapping_type);
        if let Setting::Known(mapping) = data.point_mapping_type {
            let (field, amount) = match mapping {
                PointMappingType::ValueMultiplier => ("multiplier", data.multiplier),
                PointMappingType::RatioMultiplier => ("ratio", data.ratio),
                PointMappingType::FixedAmount => ("fixed amount", data.fixed_amount),
            };
            match amount {
                None => self.node_error(node, "Distribution", &format!("has no {} defined", field)),
                Some(n) if n < 0.0 => {
                    self.node_error(node, "Distribution", &format!("has a negative {}", field))
                }
                Some(_) => {}
            }
        }
        if data.distribution_type.is_none() {
            self.node_error(node, "Distribution", "has no distribution type selected");
        }
    }
}

fn display_name(node: &ProgramNode) -> &str {
    if node.label.is_empty() {
        &node.id
    } else {
        &node.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{ProgramEdge, RuleType};

    fn rule(id: &str) -> ProgramNode {
        ProgramNode::rule(id, id.to_uppercase(), RuleData::new(RuleType::Conditional))
    }

    #[test]
    fn config_errors_name_the_node() {
        let program = ProgramDefinition::new(
            vec![ProgramNode::rule("r", "", RuleData::default())],
            vec![],
        );
        let report = validate_program(&program);
        let error = report.issues_of(Severity::Error).next().expect("an error");
        assert_eq!(error.node_id.as_deref(), Some("r"));
        assert_eq!(error.message, "Rule node \"r\" has no rule type selected");
        assert!(!report.is_valid);
    }

    #[test]
    fn linear_chain_is_clean() {
        let program = ProgramDefinition::new(
            vec![rule("a"), rule("b")],
            vec![ProgramEdge::new("e1", "a", "b")],
        );
        let report = validate_program(&program);
        assert!(report.is_valid);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn issue_serializes_with_type_tag() {
        let issue = ValidationIssue {
            severity: Severity::Warning,
            message: "m".to_string(),
            node_id: None,
            edge_id: Some("e".to_string()),
        };
        let json = serde_json::to_value(&issue).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"type": "warning", "message": "m", "edgeId": "e"})
        );
    }
}

use crate::engine::{DryTestResult, EvaluationLogEntry, EvaluationStatus};
use std::fmt::Write;

/// Formats dry test results into human-readable text.
pub struct TraceFormatter;

impl TraceFormatter {
    /// One line per visited node, in visitation order.
    pub fn format_log(log: &[EvaluationLogEntry]) -> String {
        let mut out = String::new();
        for (step, entry) in log.iter().enumerate() {
            let _ = writeln!(out, "{}", Self::format_entry(step + 1, entry));
        }
        out
    }

    /// Summary, fired distributions and the full audit trail.
    pub fn format_result(result: &DryTestResult) -> String {
        let overall = &result.overall_program_result;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "Program {}: {} points",
            if overall.triggered {
                "triggered"
            } else {
                "not triggered"
            },
            Self::format_points(overall.total_calculated_points)
        );

        if !result.detailed_distributions.is_empty() {
            let _ = writeln!(out, "\nDistributions:");
            for d in &result.detailed_distributions {
                let _ = writeln!(
                    out,
                    "  - {} [{}] ({}): {} points, triggered by {} ({})",
                    d.distribution_label,
                    d.distribution_id,
                    d.distribution_type,
                    Self::format_points(d.calculated_amount),
                    d.triggered_by_rule_label,
                    d.triggered_by_rule_id
                );
            }
        }

        let _ = writeln!(out, "\nEvaluation log:");
        for (step, entry) in result.evaluation_log.iter().enumerate() {
            let _ = writeln!(out, "  {}", Self::format_entry(step + 1, entry));
        }
        out
    }

    fn format_entry(step: usize, entry: &EvaluationLogEntry) -> String {
        format!(
            "{:>3}. {} {} '{}' [{}] = {} | {}",
            step,
            Self::status_marker(entry.evaluation_status),
            entry.node_type,
            entry.node_label,
            entry.node_id,
            entry.result_value,
            entry.details
        )
    }

    fn status_marker(status: EvaluationStatus) -> &'static str {
        match status {
            EvaluationStatus::Matched => "[+]",
            EvaluationStatus::NotMatched => "[-]",
            EvaluationStatus::Evaluated => "[=]",
            EvaluationStatus::Skipped => "[!]",
        }
    }

    fn format_points(points: f64) -> String {
        if points.fract() == 0.0 && points.abs() < 1e15 {
            format!("{}", points as i64)
        } else {
            format!("{}", points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DetailedDistribution, OverallProgramResult};
    use crate::value::Value;

    fn entry(id: &str, status: EvaluationStatus, value: Value, details: &str) -> EvaluationLogEntry {
        EvaluationLogEntry {
            node_id: id.to_string(),
            node_label: format!("Node {}", id),
            node_type: "rule".to_string(),
            evaluation_status: status,
            result_value: value,
            details: details.to_string(),
        }
    }

    #[test]
    fn log_lines_are_numbered_in_order() {
        let log = vec![
            entry("a", EvaluationStatus::Matched, Value::Bool(true), "Rule activated"),
            entry("b", EvaluationStatus::Skipped, Value::Null, "Unknown node type: x"),
        ];
        let text = TraceFormatter::format_log(&log);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "  1. [+] rule 'Node a' [a] = true | Rule activated"
        );
        assert!(lines[1].starts_with("  2. [!]"));
        assert!(lines[1].ends_with("= null | Unknown node type: x"));
    }

    #[test]
    fn result_includes_summary_and_distributions() {
        let result = DryTestResult {
            overall_program_result: OverallProgramResult {
                triggered: true,
                total_calculated_points: 400.0,
            },
            detailed_distributions: vec![DetailedDistribution {
                distribution_id: "c".to_string(),
                distribution_label: "Double points".to_string(),
                distribution_type: "POINTS".to_string(),
                calculated_amount: 400.0,
                triggered_by_rule_id: "b".to_string(),
                triggered_by_rule_label: "Big spender".to_string(),
                conditions_met: true,
            }],
            evaluation_log: vec![entry(
                "c",
                EvaluationStatus::Evaluated,
                Value::Number(400.0),
                "Distribution calculated: 400",
            )],
        };

        let text = TraceFormatter::format_result(&result);
        assert!(text.starts_with("Program triggered: 400 points"));
        assert!(text.contains(
            "  - Double points [c] (POINTS): 400 points, triggered by Big spender (b)"
        ));
        assert!(text.contains("[=] rule 'Node c' [c] = 400 | Distribution calculated: 400"));
    }

    #[test]
    fn untriggered_result_has_no_distribution_section() {
        let result = DryTestResult {
            overall_program_result: OverallProgramResult {
                triggered: false,
                total_calculated_points: 0.0,
            },
            detailed_distributions: Vec::new(),
            evaluation_log: Vec::new(),
        };
        let text = TraceFormatter::format_result(&result);
        assert!(text.starts_with("Program not triggered: 0 points"));
        assert!(!text.contains("Distributions:"));
    }
}

//! Tests for static program validation.
mod common;
use common::*;
use loyalty_dryrun::prelude::*;
use loyalty_dryrun::validation::ValidationIssue;

fn messages(report: &ValidationReport, severity: Severity) -> Vec<&str> {
    report
        .issues_of(severity)
        .map(|i| i.message.as_str())
        .collect()
}

#[test]
fn test_well_formed_program_is_valid() {
    let report = validate_program(&create_simple_program());
    assert!(report.is_valid);
    assert_eq!(report.summary.errors, 0);
    assert_eq!(report.summary.warnings, 0);
}

#[test]
fn test_saved_program_is_valid() {
    let program = ProgramDefinition::from_json(WEB_BONUS_PROGRAM_JSON).expect("valid program");
    let report = validate_program(&program);
    // Both constraints are entry points.
    assert!(report.is_valid);
    assert_eq!(
        messages(&report, Severity::Warning),
        vec!["Program has 2 entry points, which may cause unexpected behavior"]
    );
}

#[test]
fn test_cycle_is_an_error() {
    let program = ProgramDefinition::new(
        vec![min_value("A", 1.0), conditional("B"), conditional("C")],
        edges(&[("A", "B"), ("B", "C"), ("C", "B")]),
    );
    let report = validate_program(&program);
    assert!(!report.is_valid);
    assert_eq!(
        messages(&report, Severity::Error),
        vec!["Program contains circular dependencies: Circular dependency detected: B -> C -> B"]
    );
}

#[test]
fn test_pure_cycle_has_no_entry_or_exit() {
    let program = ProgramDefinition::new(
        vec![conditional("P"), conditional("Q")],
        edges(&[("P", "Q"), ("Q", "P")]),
    );
    let report = validate_program(&program);
    let errors = messages(&report, Severity::Error);
    assert!(errors.contains(&"Program has no entry point (no nodes without incoming connections)"));
    assert!(
        messages(&report, Severity::Warning)
            .contains(&"Program has no exit point (no nodes without outgoing connections)")
    );
}

#[test]
fn test_dangling_edge_and_isolated_node_are_warnings() {
    let mut program = create_simple_program();
    program.nodes.push(fixed_points("lonely", 5.0));
    program.edges.push(ProgramEdge::new("broken", "C", "ghost"));

    let report = validate_program(&program);
    let dangling = report
        .issues
        .iter()
        .find(|i| i.edge_id.as_deref() == Some("broken"))
        .expect("edge issue");
    assert_eq!(dangling.severity, Severity::Warning);
    assert_eq!(
        dangling.message,
        "Connection 'broken' references missing node 'ghost'"
    );

    let isolated: Vec<&ValidationIssue> = report
        .issues
        .iter()
        .filter(|i| i.node_id.as_deref() == Some("lonely"))
        .collect();
    assert!(isolated.iter().any(|i| i.message
        == "Node \"Bonus lonely\" is not connected to any other node"));
    assert!(
        messages(&report, Severity::Warning)
            .contains(&"Program contains 2 disconnected components")
    );
}

#[test]
fn test_node_configuration_errors() {
    let program = ProgramDefinition::new(
        vec![
            ProgramNode::constraint("c1", "Empty", ConstraintData::default()),
            ProgramNode::constraint(
                "c2",
                "Range",
                ConstraintData::new("value", ComparisonOperator::Between, 10),
            ),
            ProgramNode::constraint(
                "c3",
                "Channel",
                ConstraintData::new("location", ComparisonOperator::In, "web"),
            ),
            ProgramNode::operator(
                "o1",
                "Op",
                OperatorData {
                    operator_type: Setting::Unrecognized("AVG".to_string()),
                },
            ),
            ProgramNode::distribution(
                "d1",
                "Payout",
                DistributionData::value_multiplier("value", -2.0),
            ),
            ProgramNode::new(
                "x",
                "Hook",
                NodeKind::Unrecognized {
                    type_name: "webhook".to_string(),
                },
            ),
        ],
        edges(&[
            ("c1", "o1"),
            ("c2", "o1"),
            ("c3", "o1"),
            ("o1", "d1"),
            ("d1", "x"),
        ]),
    );
    let report = validate_program(&program);
    let errors = messages(&report, Severity::Error);
    for expected in [
        "Constraint node \"Empty\" has no parameter defined",
        "Constraint node \"Empty\" has no comparison operator selected",
        "Constraint node \"Empty\" has no value defined",
        "Constraint node \"Range\" uses BETWEEN but its value is not a [min, max] list",
        "Constraint node \"Channel\" uses IN but its value is not a list",
        "Operator node \"Op\" has an invalid operator type 'AVG'",
        "Distribution node \"Payout\" has a negative multiplier",
        "Distribution node \"Payout\" has no distribution type selected",
        "Node \"Hook\" has unknown type 'webhook'",
    ] {
        assert!(errors.contains(&expected), "missing {:?} in {:#?}", expected, errors);
    }
    assert_eq!(report.summary.errors, errors.len());
    assert!(!report.is_valid);
}

#[test]
fn test_missing_mapping_amount_is_an_error() {
    let mut data = DistributionData::fixed_amount(0.0).with_distribution_type("POINTS");
    data.fixed_amount = None;
    let program = ProgramDefinition::new(
        vec![conditional("r"), ProgramNode::distribution("d", "Flat", data)],
        edges(&[("r", "d")]),
    );
    let report = validate_program(&program);
    assert_eq!(
        messages(&report, Severity::Error),
        vec!["Distribution node \"Flat\" has no fixed amount defined"]
    );
}

#[test]
fn test_inactive_nodes_are_reported_as_info() {
    let program = ProgramDefinition::new(
        vec![min_value("A", 1.0), conditional("B").inactive()],
        edges(&[("A", "B")]),
    );
    let report = validate_program(&program);
    assert!(report.is_valid);
    assert_eq!(report.summary.info, 1);
    assert_eq!(messages(&report, Severity::Info), vec!["Node \"Rule B\" is inactive"]);
}

#[test]
fn test_empty_program_is_flagged() {
    let report = validate_program(&ProgramDefinition::default());
    assert!(report.is_valid);
    assert_eq!(messages(&report, Severity::Warning), vec!["Program has no nodes"]);
}

#[test]
fn test_report_serializes_to_editor_shape() {
    let program = ProgramDefinition::new(vec![conditional("B").inactive()], vec![]);
    let json = serde_json::to_value(validate_program(&program)).expect("serializable");
    assert_eq!(json["isValid"], true);
    assert_eq!(json["summary"]["info"], 1);
    assert_eq!(json["issues"][0]["type"], "warning");
    assert_eq!(json["issues"][0]["nodeId"], "B");
}

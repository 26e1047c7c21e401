//! Common test utilities for building programs and event data.
use loyalty_dryrun::prelude::*;

/// Builds edges `e1, e2, ...` from `(source, target)` pairs.
#[allow(dead_code)]
pub fn edges(pairs: &[(&str, &str)]) -> Vec<ProgramEdge> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (source, target))| ProgramEdge::new(format!("e{}", i + 1), *source, *target))
        .collect()
}

/// `value >= minimum`
#[allow(dead_code)]
pub fn min_value(id: &str, minimum: f64) -> ProgramNode {
    ProgramNode::constraint(
        id,
        format!("Value at least {}", minimum),
        ConstraintData::new("value", ComparisonOperator::GreaterOrEqual, minimum),
    )
}

#[allow(dead_code)]
pub fn conditional(id: &str) -> ProgramNode {
    ProgramNode::rule(id, format!("Rule {}", id), RuleData::new(RuleType::Conditional))
}

#[allow(dead_code)]
pub fn operator(id: &str, operator_type: OperatorType) -> ProgramNode {
    ProgramNode::operator(id, format!("Operator {}", id), OperatorData::new(operator_type))
}

/// Awards `value * multiplier` points.
#[allow(dead_code)]
pub fn value_points(id: &str, multiplier: f64) -> ProgramNode {
    ProgramNode::distribution(
        id,
        format!("Points {}", id),
        DistributionData::value_multiplier("value", multiplier).with_distribution_type("POINTS"),
    )
}

#[allow(dead_code)]
pub fn fixed_points(id: &str, amount: f64) -> ProgramNode {
    ProgramNode::distribution(id, format!("Bonus {}", id), DistributionData::fixed_amount(amount))
}

/// `A(value >= 100) -> B(CONDITIONAL) -> C(value x 2)`
#[allow(dead_code)]
pub fn create_simple_program() -> ProgramDefinition {
    ProgramDefinition::new(
        vec![min_value("A", 100.0), conditional("B"), value_points("C", 2.0)],
        edges(&[("A", "B"), ("B", "C")]),
    )
}

#[allow(dead_code)]
pub fn event_with_value(value: impl Into<Value>) -> EventData {
    EventData::new().with("value", value)
}

/// A saved program in the editor's file format: spend of 100 or more via the
/// web channel earns a 50 point bonus.
#[allow(dead_code)]
pub const WEB_BONUS_PROGRAM_JSON: &str = r#"
{
  "nodes": [
    {
      "id": "constraint-1",
      "type": "constraint",
      "position": { "x": 100, "y": 100 },
      "data": {
        "label": "Minimum spend",
        "isActive": true,
        "parameter": "value",
        "comparisonOperator": "GREATER_OR_EQUAL",
        "value": 100
      }
    },
    {
      "id": "constraint-2",
      "type": "constraint",
      "position": { "x": 100, "y": 250 },
      "data": {
        "label": "Online order",
        "isActive": true,
        "parameter": "location",
        "comparisonOperator": "IN",
        "value": ["web", "app"]
      }
    },
    {
      "id": "operator-1",
      "type": "operator",
      "position": { "x": 300, "y": 175 },
      "data": { "label": "Both", "isActive": true, "operatorType": "AND" }
    },
    {
      "id": "rule-1",
      "type": "rule",
      "position": { "x": 500, "y": 175 },
      "data": { "label": "Web bonus rule", "isActive": true, "ruleType": "CONDITIONAL" }
    },
    {
      "id": "distribution-1",
      "type": "distribution",
      "position": { "x": 700, "y": 175 },
      "data": {
        "label": "Web bonus",
        "isActive": true,
        "distributionType": "BONUS_POINTS",
        "pointMappingType": "FIXED_AMOUNT",
        "fixedAmount": "50"
      }
    }
  ],
  "edges": [
    { "id": "e1", "source": "constraint-1", "target": "operator-1", "sourceHandle": "output", "targetHandle": "input" },
    { "id": "e2", "source": "constraint-2", "target": "operator-1" },
    { "id": "e3", "source": "operator-1", "target": "rule-1" },
    { "id": "e4", "source": "rule-1", "target": "distribution-1" }
  ]
}
"#;

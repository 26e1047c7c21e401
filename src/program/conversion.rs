use super::definition::*;
use super::raw::{RawEdge, RawNode, RawNodeData, RawProgram};
use crate::error::ProgramConversionError;
use crate::value::Value;
use ahash::AHashSet;

/// A trait for data models that can be converted into a [`ProgramDefinition`].
///
/// This is the extension point for feeding the engine from formats other than
/// the editor's own JSON. Implement it on your top-level struct and hand the
/// result to [`DryTestEngine::run`](crate::engine::DryTestEngine::run).
///
/// # Example
///
/// ```rust
/// use loyalty_dryrun::error::ProgramConversionError;
/// use loyalty_dryrun::program::*;
///
/// struct Threshold { attribute: String, minimum: f64 }
///
/// impl IntoProgram for Threshold {
///     fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError> {
///         let constraint = ProgramNode::constraint(
///             "c1",
///             "Minimum spend",
///             ConstraintData::new(self.attribute, ComparisonOperator::GreaterOrEqual, self.minimum),
///         );
///         Ok(ProgramDefinition::new(vec![constraint], vec![]))
///     }
/// }
///
/// let program = Threshold { attribute: "value".into(), minimum: 100.0 }.into_program().unwrap();
/// assert_eq!(program.nodes.len(), 1);
/// ```
pub trait IntoProgram {
    /// Consumes the object and converts it into a program definition.
    fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError>;
}

impl IntoProgram for ProgramDefinition {
    fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError> {
        ensure_unique_ids(self.nodes.iter().map(|n| n.id.as_str()))?;
        Ok(self)
    }
}

impl IntoProgram for RawProgram {
    fn into_program(self) -> Result<ProgramDefinition, ProgramConversionError> {
        ensure_unique_ids(self.nodes.iter().map(|n| n.id.as_str()))?;
        let nodes = self.nodes.into_iter().map(ProgramNode::from).collect();
        let edges = self.edges.into_iter().map(ProgramEdge::from).collect();
        Ok(ProgramDefinition { nodes, edges })
    }
}

impl ProgramDefinition {
    /// Parses a saved program (`{ "nodes": [...], "edges": [...] }`).
    pub fn from_json(json: &str) -> Result<Self, ProgramConversionError> {
        let raw: RawProgram = serde_json::from_str(json)?;
        raw.into_program()
    }
}

fn ensure_unique_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ProgramConversionError> {
    let mut seen = AHashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ProgramConversionError::DuplicateNodeId(id.to_string()));
        }
    }
    Ok(())
}

impl From<RawNode> for ProgramNode {
    fn from(raw: RawNode) -> Self {
        let RawNode {
            id, node_type, data, ..
        } = raw;
        let label = data.label.clone().unwrap_or_default();
        let is_active = data.is_active.unwrap_or(false);
        let kind = match node_type.as_str() {
            "constraint" => NodeKind::Constraint(constraint_data(&data)),
            "rule" => NodeKind::Rule(RuleData {
                rule_type: Setting::parse(data.rule_type.as_deref()),
                threshold: data.threshold.as_ref().and_then(config_number),
            }),
            "operator" => NodeKind::Operator(OperatorData {
                operator_type: Setting::parse(data.operator_type.as_deref()),
            }),
            "distribution" => NodeKind::Distribution(distribution_data(data)),
            _ => NodeKind::Unrecognized {
                type_name: node_type.clone(),
            },
        };
        ProgramNode {
            id,
            label,
            is_active,
            kind,
        }
    }
}

impl From<RawEdge> for ProgramEdge {
    fn from(raw: RawEdge) -> Self {
        ProgramEdge {
            id: raw.id,
            source: raw.source,
            target: raw.target,
        }
    }
}

fn constraint_data(data: &RawNodeData) -> ConstraintData {
    let value = data.value.as_ref().and_then(|json| match json {
        serde_json::Value::Array(items) => Some(ConstraintValue::List(
            items.iter().filter_map(Value::from_json_scalar).collect(),
        )),
        other => Value::from_json_scalar(other).map(ConstraintValue::Scalar),
    });
    ConstraintData {
        parameter: non_empty(data.parameter.clone()),
        comparison_operator: Setting::parse(data.comparison_operator.as_deref()),
        value,
    }
}

fn distribution_data(data: RawNodeData) -> DistributionData {
    DistributionData {
        point_mapping_type: Setting::parse(data.point_mapping_type.as_deref()),
        multiplier: data.multiplier.as_ref().and_then(config_number),
        ratio: data.ratio.as_ref().and_then(config_number),
        fixed_amount: data.fixed_amount.as_ref().and_then(config_number),
        base_value_field: non_empty(data.base_value_field),
        distribution_type: non_empty(data.distribution_type),
    }
}

/// Numeric configuration fields may be saved as numbers or numeric strings.
fn config_number(json: &serde_json::Value) -> Option<f64> {
    Value::from_json_scalar(json).map(|v| v.as_number())
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

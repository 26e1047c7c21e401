use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Generates a closed enumeration whose variants map one-to-one onto the wire
/// strings used by saved programs.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $( $variant:ident => $wire:expr ),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),*
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )*
                    other => Err(other.to_string()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Comparison performed by a constraint node.
    ComparisonOperator {
        Equal => "EQUAL",
        GreaterOrEqual => "GREATER_OR_EQUAL",
        Between => "BETWEEN",
        In => "IN",
    }
);

wire_enum!(
    /// How a rule node combines its dependency results.
    RuleType {
        Conditional => "CONDITIONAL",
        Threshold => "THRESHOLD",
        Sequential => "SEQUENTIAL",
    }
);

wire_enum!(
    /// Aggregation performed by an operator node.
    OperatorType {
        Sum => "SUM",
        Max => "MAX",
        Share => "SHARE",
        And => "AND",
        Or => "OR",
    }
);

wire_enum!(
    /// How a distribution node turns event data into points.
    PointMappingType {
        ValueMultiplier => "VALUE_MULTIPLIER",
        RatioMultiplier => "RATIO_MULTIPLIER",
        FixedAmount => "FIXED_AMOUNT",
    }
);

/// An enumerated node setting as found in a saved program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting<T> {
    Missing,
    Unrecognized(String),
    Known(T),
}

impl<T: FromStr> Setting<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Setting::Missing,
            Some(s) => match s.parse() {
                Ok(known) => Setting::Known(known),
                Err(_) => Setting::Unrecognized(s.to_string()),
            },
        }
    }
}

impl<T> Setting<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Setting::Known(t) => Some(t),
            _ => None,
        }
    }
}

impl<T> Default for Setting<T> {
    fn default() -> Self {
        Setting::Missing
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Setting::Known(value)
    }
}

/// The configured right-hand side of a constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintValue {
    Scalar(Value),
    List(Vec<Value>),
}

impl ConstraintValue {
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        ConstraintValue::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            ConstraintValue::List(items) => Some(items),
            ConstraintValue::Scalar(_) => None,
        }
    }
}

macro_rules! scalar_constraint_value {
    ($($source:ty),*) => {
        $(
            impl From<$source> for ConstraintValue {
                fn from(value: $source) -> Self {
                    ConstraintValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_constraint_value!(Value, f64, i64, i32, bool, &str, String);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConstraintData {
    /// Name of the event attribute under test.
    pub parameter: Option<String>,
    pub comparison_operator: Setting<ComparisonOperator>,
    pub value: Option<ConstraintValue>,
}

impl ConstraintData {
    pub fn new(
        parameter: impl Into<String>,
        comparison_operator: ComparisonOperator,
        value: impl Into<ConstraintValue>,
    ) -> Self {
        Self {
            parameter: Some(parameter.into()),
            comparison_operator: Setting::Known(comparison_operator),
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleData {
    pub rule_type: Setting<RuleType>,
    pub threshold: Option<f64>,
}

impl RuleData {
    pub fn new(rule_type: RuleType) -> Self {
        Self {
            rule_type: Setting::Known(rule_type),
            threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperatorData {
    pub operator_type: Setting<OperatorType>,
}

impl OperatorData {
    pub fn new(operator_type: OperatorType) -> Self {
        Self {
            operator_type: Setting::Known(operator_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistributionData {
    pub point_mapping_type: Setting<PointMappingType>,
    pub multiplier: Option<f64>,
    pub ratio: Option<f64>,
    pub fixed_amount: Option<f64>,
    /// Event attribute holding the base value for multiplier mappings.
    pub base_value_field: Option<String>,
    /// Free-form reward category (e.g. "POINTS"), reported back in results.
    pub distribution_type: Option<String>,
}

impl DistributionData {
    pub fn value_multiplier(base_value_field: impl Into<String>, multiplier: f64) -> Self {
        Self {
            point_mapping_type: Setting::Known(PointMappingType::ValueMultiplier),
            multiplier: Some(multiplier),
            base_value_field: Some(base_value_field.into()),
            ..Default::default()
        }
    }

    pub fn ratio_multiplier(base_value_field: impl Into<String>, ratio: f64) -> Self {
        Self {
            point_mapping_type: Setting::Known(PointMappingType::RatioMultiplier),
            ratio: Some(ratio),
            base_value_field: Some(base_value_field.into()),
            ..Default::default()
        }
    }

    pub fn fixed_amount(amount: f64) -> Self {
        Self {
            point_mapping_type: Setting::Known(PointMappingType::FixedAmount),
            fixed_amount: Some(amount),
            ..Default::default()
        }
    }

    pub fn with_distribution_type(mut self, distribution_type: impl Into<String>) -> Self {
        self.distribution_type = Some(distribution_type.into());
        self
    }
}

/// The type-specific payload of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Constraint(ConstraintData),
    Rule(RuleData),
    Operator(OperatorData),
    Distribution(DistributionData),
    /// A node whose `type` is none of the four known kinds.
    Unrecognized { type_name: String },
}

impl NodeKind {
    /// The wire name of the node type.
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::Constraint(_) => "constraint",
            NodeKind::Rule(_) => "rule",
            NodeKind::Operator(_) => "operator",
            NodeKind::Distribution(_) => "distribution",
            NodeKind::Unrecognized { type_name } => type_name,
        }
    }
}

/// A single node of a loyalty program graph.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    pub id: String,
    pub label: String,
    pub is_active: bool,
    pub kind: NodeKind,
}

impl ProgramNode {
    /// Creates an active node.
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            is_active: true,
            kind,
        }
    }

    pub fn constraint(id: impl Into<String>, label: impl Into<String>, data: ConstraintData) -> Self {
        Self::new(id, label, NodeKind::Constraint(data))
    }

    pub fn rule(id: impl Into<String>, label: impl Into<String>, data: RuleData) -> Self {
        Self::new(id, label, NodeKind::Rule(data))
    }

    pub fn operator(id: impl Into<String>, label: impl Into<String>, data: OperatorData) -> Self {
        Self::new(id, label, NodeKind::Operator(data))
    }

    pub fn distribution(
        id: impl Into<String>,
        label: impl Into<String>,
        data: DistributionData,
    ) -> Self {
        Self::new(id, label, NodeKind::Distribution(data))
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// A directed connection: `source` is evaluated before `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl ProgramEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The canonical definition of a loyalty program, ready for evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramDefinition {
    pub nodes: Vec<ProgramNode>,
    pub edges: Vec<ProgramEdge>,
}

impl ProgramDefinition {
    pub fn new(nodes: Vec<ProgramNode>, edges: Vec<ProgramEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn node(&self, id: &str) -> Option<&ProgramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

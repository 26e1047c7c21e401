use crate::program::{ComparisonOperator, ConstraintData, ConstraintValue, EventData, Setting};
use crate::value::Value;
use tracing::trace;

/// Tests one event attribute against a configured value.
pub struct ConstraintEvaluator;

impl ConstraintEvaluator {
    /// Evaluates the constraint. Any missing piece of configuration, or an
    /// attribute absent from the event, yields `false`.
    pub fn evaluate(data: &ConstraintData, is_active: bool, event: &EventData) -> bool {
        if !is_active {
            trace!("constraint inactive");
            return false;
        }
        let (Some(parameter), Some(configured)) = (&data.parameter, &data.value) else {
            trace!("constraint missing parameter or value");
            return false;
        };
        let Setting::Known(operator) = &data.comparison_operator else {
            trace!(operator = ?data.comparison_operator, "constraint has no usable operator");
            return false;
        };
        let Some(attribute) = event.get(parameter) else {
            trace!(%parameter, "attribute not present in event data");
            return false;
        };

        let result = Self::compare(*operator, attribute, configured);
        trace!(%parameter, %attribute, %operator, result, "constraint compared");
        result
    }

    fn compare(operator: ComparisonOperator, attribute: &Value, configured: &ConstraintValue) -> bool {
        match operator {
            ComparisonOperator::GreaterOrEqual => {
                attribute.as_number() >= scalar_number(configured)
            }
            ComparisonOperator::Equal => match configured {
                ConstraintValue::List(items) => contains_raw(items, attribute),
                ConstraintValue::Scalar(value) => attribute.as_number() == value.as_number(),
            },
            ComparisonOperator::Between => match configured.as_list() {
                Some([min, max]) => {
                    let n = attribute.as_number();
                    n >= min.as_number() && n <= max.as_number()
                }
                _ => false,
            },
            ComparisonOperator::In => match configured.as_list() {
                Some(items) => contains_raw(items, attribute),
                None => false,
            },
        }
    }

    /// A short human-readable account of the comparison, e.g.
    /// `value (was 150) >= 100`. `None` when the constraint could not be applied.
    pub fn explain(data: &ConstraintData, event: &EventData) -> Option<String> {
        let parameter = data.parameter.as_ref()?;
        let configured = data.value.as_ref()?;
        let operator = data.comparison_operator.known()?;
        let attribute = event.get(parameter)?;
        let rhs = match configured {
            ConstraintValue::Scalar(v) => v.to_string(),
            ConstraintValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(Value::to_string).collect();
                format!("[{}]", rendered.join(", "))
            }
        };
        let symbol = match operator {
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::Between => "BETWEEN",
            ComparisonOperator::In => "IN",
        };
        Some(format!("{} (was {}) {} {}", parameter, attribute, symbol, rhs))
    }
}

/// Numeric view of a configured scalar. A list has no numeric value.
fn scalar_number(configured: &ConstraintValue) -> f64 {
    match configured {
        ConstraintValue::Scalar(v) => v.as_number(),
        ConstraintValue::List(_) => 0.0,
    }
}

fn contains_raw(items: &[Value], attribute: &Value) -> bool {
    items.iter().any(|item| item.loosely_equals(attribute))
}

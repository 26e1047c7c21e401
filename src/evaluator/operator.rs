use crate::error::NodeEvaluationError;
use crate::program::{OperatorData, OperatorType, Setting};
use crate::value::Value;
use tracing::trace;

/// Aggregates dependency results with SUM/MAX/SHARE/AND/OR.
pub struct OperatorEvaluator;

impl OperatorEvaluator {
    /// Returns `Value::Null` ("no opinion") when the node is inactive or its
    /// operator type is unusable. `Null` inputs are ignored.
    pub fn evaluate(
        data: &OperatorData,
        is_active: bool,
        dependencies: &[Value],
    ) -> Result<Value, NodeEvaluationError> {
        if !is_active {
            trace!("operator inactive");
            return Ok(Value::Null);
        }
        let Setting::Known(operator_type) = &data.operator_type else {
            trace!(operator_type = ?data.operator_type, "operator has no usable type");
            return Ok(Value::Null);
        };

        let inputs: Vec<&Value> = dependencies.iter().filter(|v| !v.is_null()).collect();
        let result = match operator_type {
            OperatorType::Sum => Value::Number(checked(*operator_type, sum(&inputs))?),
            OperatorType::Max => Value::Number(checked(*operator_type, max(&inputs))?),
            // Proportional splitting is not defined yet; SHARE behaves as SUM.
            OperatorType::Share => Value::Number(checked(*operator_type, sum(&inputs))?),
            OperatorType::And => {
                Value::Bool(!inputs.is_empty() && inputs.iter().all(|v| v.is_truthy()))
            }
            OperatorType::Or => Value::Bool(inputs.iter().any(|v| v.is_truthy())),
        };
        trace!(%operator_type, inputs = inputs.len(), %result, "operator evaluated");
        Ok(result)
    }
}

fn sum(inputs: &[&Value]) -> f64 {
    inputs.iter().map(|v| v.as_number()).sum()
}

fn max(inputs: &[&Value]) -> f64 {
    inputs
        .iter()
        .map(|v| v.as_number())
        .reduce(f64::max)
        .unwrap_or(0.0)
}

fn checked(operator_type: OperatorType, value: f64) -> Result<f64, NodeEvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NodeEvaluationError::NonFiniteResult {
            operation: operator_type.to_string(),
            value,
        })
    }
}

use crate::error::NodeEvaluationError;
use crate::program::{DistributionData, EventData, PointMappingType, Setting};
use crate::value::Value;
use tracing::trace;

/// Terminal reward nodes: compute the points a distribution awards.
pub struct DistributionEvaluator;

impl DistributionEvaluator {
    /// Returns `0` unless the node is active, at least one dependency result
    /// is truthy, and a point mapping type is configured.
    pub fn evaluate(
        data: &DistributionData,
        is_active: bool,
        dependencies: &[Value],
        event: &EventData,
    ) -> Result<f64, NodeEvaluationError> {
        if !is_active {
            trace!("distribution inactive");
            return Ok(0.0);
        }
        if !dependencies.iter().any(Value::is_truthy) {
            trace!("distribution not activated by any dependency");
            return Ok(0.0);
        }
        let Setting::Known(mapping) = &data.point_mapping_type else {
            trace!(mapping = ?data.point_mapping_type, "distribution has no usable point mapping");
            return Ok(0.0);
        };

        let amount = match mapping {
            PointMappingType::ValueMultiplier => {
                base_value(data, event) * data.multiplier.unwrap_or(0.0)
            }
            PointMappingType::RatioMultiplier => base_value(data, event) * data.ratio.unwrap_or(0.0),
            PointMappingType::FixedAmount => data.fixed_amount.unwrap_or(0.0),
        };
        trace!(%mapping, amount, "distribution calculated");

        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(NodeEvaluationError::NonFiniteResult {
                operation: mapping.to_string(),
                value: amount,
            })
        }
    }
}

/// Numeric value of the `baseValueField` attribute, `0` when unset or absent.
fn base_value(data: &DistributionData, event: &EventData) -> f64 {
    data.base_value_field
        .as_deref()
        .and_then(|field| event.get(field))
        .map(Value::as_number)
        .unwrap_or(0.0)
}

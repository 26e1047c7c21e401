//! Per-type node evaluation strategies.
//!
//! Each evaluator sees only the node's own payload, its active flag and,
//! where relevant, the already computed results of its direct dependencies
//! and the event record. Inactive nodes short-circuit to the type's neutral
//! value: `false` for constraints and rules, `Null` for operators, `0` for
//! distributions.

mod constraint;
mod distribution;
mod operator;
mod rule;

pub use constraint::ConstraintEvaluator;
pub use distribution::DistributionEvaluator;
pub use operator::OperatorEvaluator;
pub use rule::RuleEvaluator;

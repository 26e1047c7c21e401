//! # loyalty-dryrun - Loyalty Program Dry Test Engine
//!
//! **loyalty-dryrun** evaluates a loyalty program, a directed graph of typed
//! nodes (constraints, rules, operators and point distributions), against a
//! single event record. It reports which distributions fire, how many points
//! they award, and an audit entry for every node it visited.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Program**: Parse the saved program JSON with
//!     [`ProgramDefinition::from_json`](program::ProgramDefinition::from_json), or implement
//!     [`IntoProgram`](program::IntoProgram) to convert your own format.
//! 2.  **Describe the Event**: Build an [`EventData`](program::EventData) record of
//!     attribute values.
//! 3.  **Run**: Call [`dry_test_program`](engine::dry_test_program), or configure a
//!     [`DryTestEngine`](engine::DryTestEngine) through its builder.
//! 4.  **Inspect**: Read the [`DryTestResult`](engine::DryTestResult) directly, serialize
//!     it to JSON, or render it with [`TraceFormatter`](trace::TraceFormatter).
//!
//! ## Quick Start
//!
//! ```rust
//! use loyalty_dryrun::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Spend at least 100, earn double points.
//! let program = ProgramDefinition::new(
//!     vec![
//!         ProgramNode::constraint(
//!             "a",
//!             "Big basket",
//!             ConstraintData::new("value", ComparisonOperator::GreaterOrEqual, 100),
//!         ),
//!         ProgramNode::rule("b", "Qualifies", RuleData::new(RuleType::Conditional)),
//!         ProgramNode::distribution(
//!             "c",
//!             "Double points",
//!             DistributionData::value_multiplier("value", 2.0),
//!         ),
//!     ],
//!     vec![ProgramEdge::new("e1", "a", "b"), ProgramEdge::new("e2", "b", "c")],
//! );
//! let event = EventData::new().with("value", 200);
//!
//! let result = dry_test_program(&program, &event)?;
//! assert!(result.overall_program_result.triggered);
//! assert_eq!(result.overall_program_result.total_calculated_points, 400.0);
//! assert_eq!(result.detailed_distributions[0].triggered_by_rule_id, "b");
//!
//! println!("{}", TraceFormatter::format_result(&result));
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Model
//!
//! A circular dependency is the only fatal condition: the run returns
//! [`DryTestError`](error::DryTestError) and no partial result. Misconfigured
//! nodes evaluate to their neutral value, edges to unknown nodes are dropped,
//! and nodes of unknown type or whose evaluation fails are logged as
//! `SKIPPED`. Use [`validate_program`](validation::validate_program) to surface
//! those defects up front.

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod prelude;
pub mod program;
pub mod trace;
pub mod validation;
pub mod value;

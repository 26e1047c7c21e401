//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build or load a program, run it and read
//! the result.
//!
//! # Example
//!
//! ```rust,no_run
//! use loyalty_dryrun::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let program = ProgramDefinition::from_json(&std::fs::read_to_string("program.json")?)?;
//! let event = EventData::from_json(&std::fs::read_to_string("event.json")?)?;
//!
//! let engine = DryTestEngine::builder()
//!     .aggregation(AggregationPolicy::Distributions)
//!     .build();
//! let result = engine.run(&program, &event)?;
//!
//! println!("{}", TraceFormatter::format_result(&result));
//! # Ok(())
//! # }
//! ```

// Running a dry test
pub use crate::engine::{
    AggregationPolicy, DetailedDistribution, DryTestEngine, DryTestResult, EngineOptions,
    EvaluationLogEntry, EvaluationStatus, dry_test_program,
};

// Program model
pub use crate::program::{
    ComparisonOperator, ConstraintData, ConstraintValue, DistributionData, EventData,
    IntoProgram, NodeKind, OperatorData, OperatorType, PointMappingType, ProgramDefinition,
    ProgramEdge, ProgramNode, ProgramTemplate, RuleData, RuleType, Setting,
};
pub use crate::value::Value;

// Error types
pub use crate::error::{
    CircularDependencyError, DryTestError, NodeEvaluationError, ProgramConversionError,
};

// Reporting
pub use crate::trace::TraceFormatter;
pub use crate::validation::{Severity, ValidationReport, validate_program};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

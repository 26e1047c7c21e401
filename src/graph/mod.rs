//! Dependency analysis for program graphs.
//!
//! [`DependencyGraph`] turns the edge list into per-node adjacency and
//! [`Scheduler`] derives the evaluation order from it, failing on cycles.

mod dependency;
mod scheduler;

pub use dependency::DependencyGraph;
pub use scheduler::Scheduler;

//! # bb-suite
//!
//! Benchmark suites for BlackBench.
//!
//! Provides the suite registry (explicit lookup-or-insert of suite names),
//! parsing of suite filter strings, the built-in analytic function family
//! with its mixed-integer variant, and objective transforms.

mod analytic;
mod mixint;
mod objective;
mod problem;
mod registry;
mod suite;
mod transforms;

pub use analytic::{AnalyticBackend, AnalyticFunction, InstanceOptimum};
pub use mixint::{MixedIntegerRegion, MixintBackend};
pub use objective::{ellipsoid, rastrigin, rosenbrock, sphere, Objective};
pub use problem::BenchmarkProblem;
pub use registry::{SuiteRegistry, DEFAULT_SUITE};
pub use suite::{Suite, SuiteBackend, SuiteInstance, SuiteOptions};
pub use transforms::{oscillate, Discretized, Offset, Oscillated, Penalized, Shifted};

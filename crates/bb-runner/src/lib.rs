//! # bb-runner
//!
//! BlackBench experiment runner: opens a suite, attaches observers to every
//! problem and spends each problem's `dimension * budget_multiplier`
//! evaluations with CMA-ES restarts, random search or a Latin Hypercube
//! design.

pub mod algorithm;
pub mod config;
pub mod progress;
pub mod runner;
pub mod strategy;

pub use algorithm::Algorithm;
pub use config::{default_experiments, ExperimentConfig};
pub use progress::ProgressPrinter;
pub use runner::{ExperimentRunner, ExperimentSummary, ProblemSummary};
pub use strategy::{CmaRestarts, LhsStrategy, OptimizeStrategy, RandomSearchStrategy};

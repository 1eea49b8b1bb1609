//! # bb-optimizer
//!
//! Optimizer adapters for BlackBench. Each adapter drives a [`bb_types::Problem`]
//! within an evaluation limit:
//!
//! - [`CmaesBackend`]: CMA-ES through the `cmaes` crate, with box repair.
//! - [`ChunkedRandomSearch`]: uniform sampling in memory-bounded chunks.
//! - [`ClassicLhs`]: Latin Hypercube designs in the unit cube.

pub mod cma;
pub mod lhs;
pub mod outcome;
pub mod random;
pub mod search;

pub use cma::{CmaMinimizer, CmaOptions, CmaesBackend};
pub use lhs::{ClassicLhs, Design, HypercubeSampler};
pub use outcome::RunOutcome;
pub use random::{ChunkedRandomSearch, RandomSampler};
pub use search::{make_rng, restart_point, uniform_point, RandomSearch, SearchStrategy};

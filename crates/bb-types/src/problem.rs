use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::errors::BbResult;

/// Identity of a benchmark problem within its suite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemInfo {
    /// Name of the suite the problem was taken from.
    pub suite: String,
    /// Stable identifier, e.g. `analytic_f003_i01_d10`.
    pub id: String,
    /// Position of the problem in suite order (zero based).
    pub index: usize,
    pub function: usize,
    pub instance: usize,
    pub dimension: usize,
}

impl ProblemInfo {
    pub fn new(suite: impl Into<String>, function: usize, instance: usize, dimension: usize) -> Self {
        let suite = suite.into();
        let id = format!("{suite}_f{function:03}_i{instance:02}_d{dimension:02}");
        Self {
            suite,
            id,
            index: 0,
            function,
            instance,
            dimension,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl std::fmt::Display for ProblemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}

/// A stateful black-box objective.
///
/// Every successful call to [`Problem::evaluate`] increments the evaluation
/// counter by one; optimizers and runners rely on the counter, never on their
/// own bookkeeping, to decide when a budget is spent.
pub trait Problem {
    fn info(&self) -> &ProblemInfo;

    fn bounds(&self) -> &Bounds;

    fn dimension(&self) -> usize {
        self.bounds().dimension()
    }

    fn lower_bounds(&self) -> &[f64] {
        self.bounds().lower()
    }

    fn upper_bounds(&self) -> &[f64] {
        self.bounds().upper()
    }

    /// Suggested starting point for the first optimizer run.
    fn initial_solution(&self) -> Vec<f64>;

    /// Number of evaluations performed so far.
    fn evaluations(&self) -> u64;

    /// Best objective value seen so far, if any evaluation happened.
    fn best_observed_value(&self) -> Option<f64>;

    /// Evaluates the objective at `x`.
    fn evaluate(&mut self, x: &[f64]) -> BbResult<f64>;
}

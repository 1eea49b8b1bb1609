//! CMA-ES adapter backed by the `cmaes` crate.

use bb_types::{BbError, BbResult, Bounds, OptimizerError, Problem, ProblemError};
use cmaes::{CMAESOptions, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::outcome::RunOutcome;

/// Evaluations between progress printouts when `verbose > 0`.
const PRINT_GAP_EVALS: usize = 200;

/// Options of a single CMA-ES run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmaOptions {
    /// Stop once this many evaluations were spent in the run. The run may
    /// overshoot by less than one generation.
    pub max_fevals: u64,
    /// Candidates are repaired into this box before evaluation.
    pub bounds: Option<Bounds>,
    /// `<= 0` is silent; positive values print progress.
    pub verbose: i32,
    pub seed: Option<u64>,
}

impl CmaOptions {
    pub fn new(max_fevals: u64) -> Self {
        Self {
            max_fevals,
            bounds: None,
            verbose: -9,
            seed: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_verbose(mut self, verbose: i32) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A CMA-ES implementation minimizing a problem from a start point.
pub trait CmaMinimizer {
    fn fmin(
        &mut self,
        problem: &mut dyn Problem,
        x0: &[f64],
        sigma0: f64,
        options: &CmaOptions,
    ) -> BbResult<RunOutcome>;
}

/// [`CmaMinimizer`] running the `cmaes` crate with its default parameters.
#[derive(Debug, Clone, Default)]
pub struct CmaesBackend {
    population_size: Option<usize>,
}

impl CmaesBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_population_size(mut self, lambda: usize) -> Self {
        self.population_size = Some(lambda);
        self
    }
}

fn invalid(message: impl Into<String>) -> BbError {
    OptimizerError::InvalidOptions {
        optimizer: "cma-es".to_string(),
        message: message.into(),
    }
    .into()
}

impl CmaMinimizer for CmaesBackend {
    fn fmin(
        &mut self,
        problem: &mut dyn Problem,
        x0: &[f64],
        sigma0: f64,
        options: &CmaOptions,
    ) -> BbResult<RunOutcome> {
        let dimension = problem.dimension();
        if x0.len() != dimension {
            return Err(ProblemError::DimensionMismatch {
                expected: dimension,
                actual: x0.len(),
            }
            .into());
        }
        if !(sigma0.is_finite() && sigma0 > 0.0) {
            return Err(invalid(format!("initial step size {sigma0} must be positive")));
        }
        if options.max_fevals == 0 {
            return Ok(RunOutcome::default());
        }

        let bounds = options.bounds.as_ref();
        let start = match bounds {
            Some(b) => b.clamp(x0),
            None => x0.to_vec(),
        };

        let mut outcome = RunOutcome::default();
        let mut failure: Option<BbError> = None;
        let reasons = {
            let objective = |x: &DVector<f64>| -> f64 {
                if failure.is_some() {
                    return f64::MAX;
                }
                let raw: Vec<f64> = x.iter().copied().collect();
                let candidate = match bounds {
                    Some(b) => b.clamp(&raw),
                    None => raw,
                };
                match problem.evaluate(&candidate) {
                    Ok(value) => {
                        outcome.observe(&candidate, value);
                        value
                    }
                    Err(err) => {
                        // the remaining generations only see a flat landscape
                        failure = Some(err);
                        f64::MAX
                    }
                }
            };

            let mut builder = CMAESOptions::new(start, sigma0)
                .max_function_evals(options.max_fevals as usize);
            if let Some(seed) = options.seed {
                builder = builder.seed(seed);
            }
            if let Some(lambda) = self.population_size {
                builder = builder.population_size(lambda);
            }
            if options.verbose > 0 {
                builder = builder.enable_printing(PRINT_GAP_EVALS);
            }

            let mut state = builder
                .build(objective)
                .map_err(|e| invalid(format!("{e:?}")))?;
            let termination = state.run();
            format!("{:?}", termination.reasons)
        };

        if let Some(err) = failure {
            return Err(err);
        }

        debug!(
            "cma-es run on {}: {} evaluations, best {:?}, stopped by {}",
            problem.info().id,
            outcome.evaluations,
            outcome.best_value,
            reasons
        );
        Ok(outcome)
    }
}

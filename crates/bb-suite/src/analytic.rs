//! Built-in suite of analytic test functions.
//!
//! Each instance moves the optimum to a pseudo-random point `x_opt` in
//! `[-4, 4]^n` and the optimal value to `f_opt`, both derived
//! deterministically from `(function, instance, dimension)`.

use bb_types::{BbResult, Bounds, ProblemError, ProblemInfo};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::objective::{ellipsoid, rastrigin, rosenbrock, sphere, Objective};
use crate::problem::BenchmarkProblem;
use crate::suite::SuiteBackend;
use crate::transforms::{Offset, Oscillated, Penalized, Shifted};

pub(crate) const ANALYTIC_LOWER: f64 = -5.0;
pub(crate) const ANALYTIC_UPPER: f64 = 5.0;
const PENALTY_FACTOR: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticFunction {
    Sphere = 1,
    Ellipsoid = 2,
    Rastrigin = 3,
    Rosenbrock = 4,
    PenalizedRastrigin = 5,
}

impl AnalyticFunction {
    pub const ALL: [AnalyticFunction; 5] = [
        Self::Sphere,
        Self::Ellipsoid,
        Self::Rastrigin,
        Self::Rosenbrock,
        Self::PenalizedRastrigin,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.index() == index)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Ellipsoid => "ellipsoid",
            Self::Rastrigin => "rastrigin",
            Self::Rosenbrock => "rosenbrock",
            Self::PenalizedRastrigin => "penalized-rastrigin",
        }
    }
}

/// Optimum location and value of one problem instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOptimum {
    pub x_opt: Vec<f64>,
    pub f_opt: f64,
}

impl InstanceOptimum {
    pub fn generate(function: usize, instance: usize, dimension: usize) -> Self {
        let seed = (function as u64)
            .wrapping_mul(1_000_003)
            .wrapping_add((instance as u64).wrapping_mul(10_007))
            .wrapping_add(dimension as u64);
        let mut rng = StdRng::seed_from_u64(seed);

        let x_opt = (0..dimension)
            .map(|_| round_to(rng.random_range(-4.0..4.0), 4))
            .collect();
        let f_opt = round_to(rng.random_range(-100.0..100.0), 2);
        Self { x_opt, f_opt }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn boxed<O: Objective + 'static>(objective: O, f_opt: f64) -> Box<dyn Objective> {
    Box::new(Offset::new(objective, f_opt))
}

/// The objective of `function` with its optimum `f_opt` at `x_opt`, defined
/// over the analytic box `bounds`.
pub(crate) fn instance_objective(
    function: AnalyticFunction,
    x_opt: Vec<f64>,
    f_opt: f64,
    bounds: &Bounds,
) -> Box<dyn Objective> {
    match function {
        AnalyticFunction::Sphere => boxed(Shifted::new(sphere, x_opt), f_opt),
        AnalyticFunction::Ellipsoid => boxed(Shifted::new(Oscillated::new(ellipsoid), x_opt), f_opt),
        AnalyticFunction::Rastrigin => boxed(Shifted::new(Oscillated::new(rastrigin), x_opt), f_opt),
        AnalyticFunction::Rosenbrock => {
            // Rosenbrock's optimum sits at the all-ones vector
            let shift = x_opt.iter().map(|x| x - 1.0).collect();
            boxed(Shifted::new(rosenbrock, shift), f_opt)
        }
        AnalyticFunction::PenalizedRastrigin => boxed(
            Penalized::new(
                Shifted::new(Oscillated::new(rastrigin), x_opt),
                bounds.clone(),
                PENALTY_FACTOR,
            ),
            f_opt,
        ),
    }
}

/// Backend serving the [`AnalyticFunction`] family on `[-5, 5]^n`.
#[derive(Debug, Clone, Default)]
pub struct AnalyticBackend;

impl AnalyticBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SuiteBackend for AnalyticBackend {
    fn name(&self) -> &str {
        "analytic"
    }

    fn functions(&self) -> Vec<usize> {
        AnalyticFunction::ALL.iter().map(|f| f.index()).collect()
    }

    fn default_dimensions(&self) -> Vec<usize> {
        vec![2, 3, 5, 10, 20, 40]
    }

    fn default_instances(&self) -> Vec<usize> {
        (1..=15).collect()
    }

    fn supports_dimension(&self, dimension: usize) -> bool {
        dimension >= 2
    }

    fn build(&self, info: ProblemInfo) -> BbResult<BenchmarkProblem> {
        let function = AnalyticFunction::from_index(info.function).ok_or_else(|| {
            ProblemError::UnknownFunction {
                suite: info.suite.clone(),
                function: info.function,
            }
        })?;
        if !self.supports_dimension(info.dimension) {
            return Err(ProblemError::UnsupportedDimension {
                suite: info.suite.clone(),
                dimension: info.dimension,
            }
            .into());
        }

        let dimension = info.dimension;
        let bounds = Bounds::uniform(dimension, ANALYTIC_LOWER, ANALYTIC_UPPER)?;
        let InstanceOptimum { x_opt, f_opt } =
            InstanceOptimum::generate(info.function, info.instance, dimension);

        let objective = instance_objective(function, x_opt, f_opt, &bounds);
        let initial_solution = bounds.center();
        Ok(BenchmarkProblem::new(info, bounds, objective, initial_solution)?)
    }
}

//! Per-problem optimization strategies.
//!
//! Each strategy drives one problem until its budget is spent. Only the
//! problem's own evaluation counter decides when to stop.

use bb_optimizer::{
    make_rng, restart_point, CmaMinimizer, CmaOptions, Design, HypercubeSampler, RandomSampler,
};
use bb_types::{BbResult, Budget, OptimizerError, Problem};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// Initial CMA-ES step size, relative to a `[-5, 5]`-like box.
pub const CMA_SIGMA0: f64 = 0.1;

/// Silences the CMA-ES backend.
pub const CMA_VERBOSE: i32 = -9;

/// Largest number of design points scaled and evaluated per LHS chunk.
pub const LHS_CHUNK: u64 = 500;

/// Spends a problem's evaluation budget with one optimizer family.
pub trait OptimizeStrategy {
    fn name(&self) -> &str;

    fn optimize(&mut self, problem: &mut dyn Problem, budget: Budget) -> BbResult<()>;
}

/// CMA-ES in a restart loop: the first run starts from the problem's
/// initial solution, every later run from a fresh [`restart_point`]. Each run
/// is limited to what is left of the budget.
pub struct CmaRestarts<C> {
    minimizer: C,
    rng: StdRng,
    seeded: bool,
}

impl<C: CmaMinimizer> CmaRestarts<C> {
    pub fn new(minimizer: C, seed: Option<u64>) -> Self {
        Self {
            minimizer,
            rng: make_rng(seed),
            seeded: seed.is_some(),
        }
    }
}

impl<C: CmaMinimizer> OptimizeStrategy for CmaRestarts<C> {
    fn name(&self) -> &str {
        "cma"
    }

    fn optimize(&mut self, problem: &mut dyn Problem, budget: Budget) -> BbResult<()> {
        let bounds = problem.bounds().clone();
        let mut x0 = problem.initial_solution();
        let mut runs = 0usize;

        while !budget.is_exhausted(problem.evaluations()) {
            let before = problem.evaluations();
            let mut options = CmaOptions::new(budget.remaining(before))
                .with_bounds(bounds.clone())
                .with_verbose(CMA_VERBOSE);
            if self.seeded {
                options = options.with_seed(self.rng.random());
            }

            self.minimizer.fmin(problem, &x0, CMA_SIGMA0, &options)?;
            runs += 1;

            if problem.evaluations() == before {
                return Err(OptimizerError::Stalled {
                    optimizer: "cma-es".to_string(),
                    evaluations: before,
                }
                .into());
            }
            x0 = restart_point(&bounds, &mut self.rng);
        }

        debug!(
            "{}: {} cma-es runs, {} of {} evaluations",
            problem.info().id,
            runs,
            problem.evaluations(),
            budget
        );
        Ok(())
    }
}

/// A single random search call with the whole budget.
pub struct RandomSearchStrategy<R> {
    sampler: R,
}

impl<R: RandomSampler> RandomSearchStrategy<R> {
    pub fn new(sampler: R) -> Self {
        Self { sampler }
    }
}

impl<R: RandomSampler> OptimizeStrategy for RandomSearchStrategy<R> {
    fn name(&self) -> &str {
        "rs"
    }

    fn optimize(&mut self, problem: &mut dyn Problem, budget: Budget) -> BbResult<()> {
        let bounds = problem.bounds().clone();
        self.sampler
            .random_search(problem, &bounds, budget.max_evaluations)?;
        Ok(())
    }
}

/// Evaluates a Latin Hypercube design of `budget` points, scaled into the
/// bound box, in chunks of at most [`LHS_CHUNK`] points.
pub struct LhsStrategy<S> {
    sampler: S,
    /// Sizes of the chunks evaluated by the last `optimize` call.
    chunks: Vec<usize>,
}

impl<S: HypercubeSampler> LhsStrategy<S> {
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            chunks: Vec::new(),
        }
    }
}

impl<S: HypercubeSampler> OptimizeStrategy for LhsStrategy<S> {
    fn name(&self) -> &str {
        "lhs"
    }

    fn optimize(&mut self, problem: &mut dyn Problem, budget: Budget) -> BbResult<()> {
        let bounds = problem.bounds().clone();
        let samples = budget.max_evaluations as usize;
        let mut design = Design::new(self.sampler.lhs(problem.dimension(), samples));
        let design_len = design.len();
        self.chunks.clear();

        while !budget.is_exhausted(problem.evaluations()) {
            let count = budget.remaining(problem.evaluations()).min(LHS_CHUNK) as usize;
            let chunk = design.next_chunk(count);
            if chunk.is_empty() {
                return Err(OptimizerError::DesignExhausted {
                    optimizer: "lhs".to_string(),
                    used: design_len,
                    requested: budget.max_evaluations,
                }
                .into());
            }
            self.chunks.push(chunk.len());
            for unit in chunk {
                problem.evaluate(&bounds.scale_unit(unit))?;
            }
        }

        debug!(
            "{}: {} design points in chunks {:?}",
            problem.info().id,
            problem.evaluations(),
            self.chunks
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_optimizer::{ClassicLhs, RunOutcome};
    use bb_types::{BbError, Bounds, ProblemInfo};

    /// Sphere over `[-5, 5]^d` remembering every evaluated point.
    struct RecordingProblem {
        info: ProblemInfo,
        bounds: Bounds,
        evaluations: u64,
        best: Option<f64>,
        points: Vec<Vec<f64>>,
    }

    impl RecordingProblem {
        fn new(dimension: usize) -> Self {
            Self {
                info: ProblemInfo::new("mock", 1, 1, dimension),
                bounds: Bounds::uniform(dimension, -5.0, 5.0).unwrap(),
                evaluations: 0,
                best: None,
                points: Vec::new(),
            }
        }
    }

    impl Problem for RecordingProblem {
        fn info(&self) -> &ProblemInfo {
            &self.info
        }

        fn bounds(&self) -> &Bounds {
            &self.bounds
        }

        fn initial_solution(&self) -> Vec<f64> {
            vec![0.5; self.info.dimension]
        }

        fn evaluations(&self) -> u64 {
            self.evaluations
        }

        fn best_observed_value(&self) -> Option<f64> {
            self.best
        }

        fn evaluate(&mut self, x: &[f64]) -> BbResult<f64> {
            let value = x.iter().map(|xi| xi * xi).sum::<f64>();
            self.evaluations += 1;
            self.best = Some(self.best.map_or(value, |b| b.min(value)));
            self.points.push(x.to_vec());
            Ok(value)
        }
    }

    /// Spends a fixed batch per call, overshooting the limit like a real
    /// generation-based optimizer.
    struct FixedBatchCma {
        batch: u64,
        calls: Vec<(Vec<f64>, u64)>,
    }

    impl CmaMinimizer for FixedBatchCma {
        fn fmin(
            &mut self,
            problem: &mut dyn Problem,
            x0: &[f64],
            _sigma0: f64,
            options: &CmaOptions,
        ) -> BbResult<RunOutcome> {
            self.calls.push((x0.to_vec(), options.max_fevals));
            let mut outcome = RunOutcome::default();
            for _ in 0..self.batch {
                let value = problem.evaluate(x0)?;
                outcome.observe(x0, value);
            }
            Ok(outcome)
        }
    }

    struct RecordingSampler {
        calls: Vec<u64>,
    }

    impl RandomSampler for RecordingSampler {
        fn random_search(
            &mut self,
            problem: &mut dyn Problem,
            bounds: &Bounds,
            max_fevals: u64,
        ) -> BbResult<RunOutcome> {
            self.calls.push(max_fevals);
            let mut outcome = RunOutcome::default();
            let x = bounds.center();
            for _ in 0..max_fevals {
                let value = problem.evaluate(&x)?;
                outcome.observe(&x, value);
            }
            Ok(outcome)
        }
    }

    struct ShortDesign;

    impl HypercubeSampler for ShortDesign {
        fn lhs(&mut self, dimension: usize, samples: usize) -> Vec<Vec<f64>> {
            vec![vec![0.5; dimension]; samples / 2]
        }
    }

    #[test]
    fn cma_restarts_pass_the_remaining_budget() {
        let mut problem = RecordingProblem::new(4);
        let mut strategy = CmaRestarts::new(
            FixedBatchCma {
                batch: 30,
                calls: Vec::new(),
            },
            Some(3),
        );
        strategy.optimize(&mut problem, Budget::new(100)).unwrap();

        let limits: Vec<u64> = strategy.minimizer.calls.iter().map(|c| c.1).collect();
        assert_eq!(limits, vec![100, 70, 40, 10]);
        // The last run may overshoot by one batch
        assert_eq!(problem.evaluations(), 120);
    }

    #[test]
    fn cma_starts_from_the_initial_solution_then_restarts_inside_the_box() {
        let mut problem = RecordingProblem::new(3);
        let mut strategy = CmaRestarts::new(
            FixedBatchCma {
                batch: 10,
                calls: Vec::new(),
            },
            Some(8),
        );
        strategy.optimize(&mut problem, Budget::new(50)).unwrap();

        let calls = &strategy.minimizer.calls;
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[0].0, vec![0.5; 3]);
        for (x0, _) in &calls[1..] {
            assert!(problem.bounds().contains(x0));
            assert_ne!(x0, &calls[0].0);
        }
    }

    #[test]
    fn cma_with_spent_budget_never_runs() {
        let mut problem = RecordingProblem::new(2);
        let mut strategy = CmaRestarts::new(
            FixedBatchCma {
                batch: 5,
                calls: Vec::new(),
            },
            None,
        );
        strategy.optimize(&mut problem, Budget::new(0)).unwrap();
        assert!(strategy.minimizer.calls.is_empty());
    }

    #[test]
    fn stalled_cma_fails_instead_of_looping() {
        let mut problem = RecordingProblem::new(2);
        let mut strategy = CmaRestarts::new(
            FixedBatchCma {
                batch: 0,
                calls: Vec::new(),
            },
            Some(1),
        );
        let err = strategy.optimize(&mut problem, Budget::new(10)).unwrap_err();
        assert!(matches!(
            err,
            BbError::Optimizer(OptimizerError::Stalled { evaluations: 0, .. })
        ));
        assert_eq!(strategy.minimizer.calls.len(), 1);
    }

    #[test]
    fn random_search_is_called_once_with_the_full_budget() {
        let mut problem = RecordingProblem::new(10);
        let mut strategy = RandomSearchStrategy::new(RecordingSampler { calls: Vec::new() });
        strategy.optimize(&mut problem, Budget::new(200)).unwrap();
        assert_eq!(strategy.sampler.calls, vec![200]);
        assert_eq!(problem.evaluations(), 200);
    }

    #[test]
    fn lhs_evaluates_each_design_point_once() {
        let mut problem = RecordingProblem::new(3);
        let mut strategy = LhsStrategy::new(ClassicLhs::new(Some(12)));
        strategy.optimize(&mut problem, Budget::new(1234)).unwrap();

        assert_eq!(problem.evaluations(), 1234);
        assert!(problem.points.iter().all(|x| problem.bounds().contains(x)));
        let mut first_axis: Vec<f64> = problem.points.iter().map(|x| x[0]).collect();
        first_axis.sort_by(|a, b| a.partial_cmp(b).unwrap());
        first_axis.dedup();
        assert_eq!(first_axis.len(), 1234);
    }

    #[test]
    fn lhs_chunks_are_capped_at_five_hundred() {
        let mut problem = RecordingProblem::new(2);
        let mut strategy = LhsStrategy::new(ClassicLhs::new(Some(4)));
        strategy.optimize(&mut problem, Budget::new(1234)).unwrap();
        assert_eq!(strategy.chunks, vec![500, 500, 234]);

        // A fresh problem resets the chunk plan
        let mut small = RecordingProblem::new(2);
        strategy.optimize(&mut small, Budget::new(20)).unwrap();
        assert_eq!(strategy.chunks, vec![20]);
    }

    #[test]
    fn lhs_fails_when_the_design_runs_out() {
        let mut problem = RecordingProblem::new(2);
        let mut strategy = LhsStrategy::new(ShortDesign);
        let err = strategy.optimize(&mut problem, Budget::new(10)).unwrap_err();
        assert!(matches!(
            err,
            BbError::Optimizer(OptimizerError::DesignExhausted { used: 5, requested: 10, .. })
        ));
        assert_eq!(problem.evaluations(), 5);
        assert_eq!(strategy.chunks, vec![5]);
    }
}

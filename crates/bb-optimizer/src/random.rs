use bb_types::{BbResult, Bounds, Problem, ProblemError};
use tracing::debug;

use crate::outcome::RunOutcome;
use crate::search::{RandomSearch, SearchStrategy};

/// Points drawn per chunk are capped near this many coordinates.
const CHUNK_COORDINATES: u64 = 40_000;

/// Pure random search: evaluates exactly `max_fevals` uniform points.
pub trait RandomSampler {
    fn random_search(
        &mut self,
        problem: &mut dyn Problem,
        bounds: &Bounds,
        max_fevals: u64,
    ) -> BbResult<RunOutcome>;
}

/// Draws points in chunks of `1 + 40000 / dimension` so high-dimensional
/// problems never hold a huge batch in memory.
#[derive(Debug, Clone, Default)]
pub struct ChunkedRandomSearch {
    seed: Option<u64>,
}

impl ChunkedRandomSearch {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn chunk_size(dimension: usize, remaining: u64) -> usize {
        let per_chunk = 1 + CHUNK_COORDINATES / dimension.max(1) as u64;
        remaining.min(per_chunk).max(1) as usize
    }
}

impl RandomSampler for ChunkedRandomSearch {
    fn random_search(
        &mut self,
        problem: &mut dyn Problem,
        bounds: &Bounds,
        max_fevals: u64,
    ) -> BbResult<RunOutcome> {
        if bounds.dimension() != problem.dimension() {
            return Err(ProblemError::DimensionMismatch {
                expected: problem.dimension(),
                actual: bounds.dimension(),
            }
            .into());
        }

        let mut search = RandomSearch::new(bounds.clone(), self.seed);
        let mut outcome = RunOutcome::default();
        while outcome.evaluations < max_fevals {
            let remaining = max_fevals - outcome.evaluations;
            let chunk = Self::chunk_size(bounds.dimension(), remaining);
            for x in search.suggest(chunk) {
                let value = problem.evaluate(&x)?;
                outcome.observe(&x, value);
            }
        }

        debug!(
            "random search on {}: {} evaluations, best {:?}",
            problem.info().id,
            outcome.evaluations,
            outcome.best_value
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_suite::{sphere, BenchmarkProblem};
    use bb_types::ProblemInfo;

    fn problem(dimension: usize) -> BenchmarkProblem {
        let bounds = Bounds::uniform(dimension, -5.0, 5.0).unwrap();
        let center = bounds.center();
        BenchmarkProblem::new(
            ProblemInfo::new("test", 1, 1, dimension),
            bounds,
            Box::new(sphere),
            center,
        )
        .unwrap()
    }

    #[test]
    fn chunks_shrink_with_dimension() {
        assert_eq!(ChunkedRandomSearch::chunk_size(10, 200), 200);
        assert_eq!(ChunkedRandomSearch::chunk_size(10, 10_000), 4001);
        assert_eq!(ChunkedRandomSearch::chunk_size(40_000, 10_000), 2);
        assert_eq!(ChunkedRandomSearch::chunk_size(3, 0), 1);
    }

    #[test]
    fn evaluates_exactly_the_budget() {
        let mut p = problem(10);
        let bounds = p.bounds().clone();
        let outcome = ChunkedRandomSearch::new(Some(4))
            .random_search(&mut p, &bounds, 200)
            .unwrap();
        assert_eq!(outcome.evaluations, 200);
        assert_eq!(p.evaluations(), 200);
        assert!(bounds.contains(outcome.best_x.as_ref().unwrap()));
    }

    #[test]
    fn spans_several_chunks() {
        // 1 + 40000 / 20000 = 3 points per chunk
        let mut p = problem(20_000);
        let bounds = p.bounds().clone();
        let outcome = ChunkedRandomSearch::new(Some(1))
            .random_search(&mut p, &bounds, 7)
            .unwrap();
        assert_eq!(outcome.evaluations, 7);
        assert_eq!(p.evaluations(), 7);
    }

    #[test]
    fn zero_budget_does_nothing() {
        let mut p = problem(2);
        let bounds = p.bounds().clone();
        let outcome = ChunkedRandomSearch::new(None)
            .random_search(&mut p, &bounds, 0)
            .unwrap();
        assert_eq!(outcome, RunOutcome::default());
        assert_eq!(p.evaluations(), 0);
    }

    #[test]
    fn mismatched_bounds_are_rejected() {
        let mut p = problem(3);
        let bounds = Bounds::uniform(2, 0.0, 1.0).unwrap();
        assert!(ChunkedRandomSearch::new(None)
            .random_search(&mut p, &bounds, 10)
            .is_err());
    }
}

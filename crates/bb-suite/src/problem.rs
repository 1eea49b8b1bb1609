use std::sync::Arc;

use bb_types::{
    BbResult, Bounds, EvaluationRecord, Observer, Problem, ProblemError, ProblemInfo,
};
use tracing::debug;

use crate::objective::Objective;

/// A suite problem: an objective over a bound box, with an evaluation counter
/// and the observers that receive every evaluation.
pub struct BenchmarkProblem {
    info: ProblemInfo,
    bounds: Bounds,
    objective: Box<dyn Objective>,
    initial_solution: Vec<f64>,
    evaluations: u64,
    best_value: Option<f64>,
    observers: Vec<Arc<dyn Observer>>,
}

impl BenchmarkProblem {
    pub fn new(
        info: ProblemInfo,
        bounds: Bounds,
        objective: Box<dyn Objective>,
        initial_solution: Vec<f64>,
    ) -> Result<Self, ProblemError> {
        if bounds.dimension() != info.dimension {
            return Err(ProblemError::DimensionMismatch {
                expected: info.dimension,
                actual: bounds.dimension(),
            });
        }
        if initial_solution.len() != info.dimension {
            return Err(ProblemError::DimensionMismatch {
                expected: info.dimension,
                actual: initial_solution.len(),
            });
        }
        Ok(Self {
            info,
            bounds,
            objective,
            initial_solution,
            evaluations: 0,
            best_value: None,
            observers: Vec::new(),
        })
    }

    /// Attaches an observer; every later evaluation is delivered to it.
    pub fn observe_with(&mut self, observer: Arc<dyn Observer>) -> BbResult<()> {
        observer.attach(&self.info)?;
        debug!("Observer {} attached to {}", observer.name(), self.info.id);
        self.observers.push(observer);
        Ok(())
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Tells every attached observer that the problem is done and detaches them.
    pub fn finish(&mut self) -> BbResult<()> {
        for observer in self.observers.drain(..) {
            observer.finish(&self.info)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BenchmarkProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkProblem")
            .field("info", &self.info)
            .field("evaluations", &self.evaluations)
            .field("best_value", &self.best_value)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Problem for BenchmarkProblem {
    fn info(&self) -> &ProblemInfo {
        &self.info
    }

    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn initial_solution(&self) -> Vec<f64> {
        self.initial_solution.clone()
    }

    fn evaluations(&self) -> u64 {
        self.evaluations
    }

    fn best_observed_value(&self) -> Option<f64> {
        self.best_value
    }

    fn evaluate(&mut self, x: &[f64]) -> BbResult<f64> {
        if x.len() != self.info.dimension {
            return Err(ProblemError::DimensionMismatch {
                expected: self.info.dimension,
                actual: x.len(),
            }
            .into());
        }

        let value = self.objective.value(x);
        self.evaluations += 1;

        let improved = self.best_value.map_or(true, |best| value < best);
        if improved {
            self.best_value = Some(value);
        }

        if !self.observers.is_empty() {
            let record = EvaluationRecord {
                evaluation: self.evaluations,
                x: x.to_vec(),
                value,
                improved,
            };
            for observer in &self.observers {
                observer.record(&self.info, &record)?;
            }
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::sphere;
    use bb_types::{BbError, ObserverError};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collect {
        attached: Mutex<Vec<String>>,
        records: Mutex<Vec<EvaluationRecord>>,
        finished: Mutex<usize>,
    }

    impl Observer for Collect {
        fn name(&self) -> &str {
            "collect"
        }

        fn attach(&self, problem: &ProblemInfo) -> Result<(), ObserverError> {
            self.attached.lock().push(problem.id.clone());
            Ok(())
        }

        fn record(&self, _problem: &ProblemInfo, record: &EvaluationRecord) -> Result<(), ObserverError> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn finish(&self, _problem: &ProblemInfo) -> Result<(), ObserverError> {
            *self.finished.lock() += 1;
            Ok(())
        }
    }

    fn sphere_problem(dimension: usize) -> BenchmarkProblem {
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
    fn evaluations_count_and_track_best() {
        let mut problem = sphere_problem(2);
        assert_eq!(problem.evaluations(), 0);
        assert_eq!(problem.best_observed_value(), None);

        assert_eq!(problem.evaluate(&[1.0, 1.0]).unwrap(), 2.0);
        assert_eq!(problem.evaluate(&[2.0, 0.0]).unwrap(), 4.0);
        assert_eq!(problem.evaluate(&[0.5, 0.0]).unwrap(), 0.25);

        assert_eq!(problem.evaluations(), 3);
        assert_eq!(problem.best_observed_value(), Some(0.25));
    }

    #[test]
    fn wrong_length_is_rejected_without_counting() {
        let mut problem = sphere_problem(3);
        let err = problem.evaluate(&[0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            BbError::Problem(ProblemError::DimensionMismatch { expected: 3, actual: 2 })
        ));
        assert_eq!(problem.evaluations(), 0);
    }

    #[test]
    fn both_observers_receive_every_record() {
        let first = Arc::new(Collect::default());
        let second = Arc::new(Collect::default());
        let mut problem = sphere_problem(2);
        problem.observe_with(first.clone()).unwrap();
        problem.observe_with(second.clone()).unwrap();
        assert_eq!(problem.observer_count(), 2);

        problem.evaluate(&[1.0, 0.0]).unwrap();
        problem.evaluate(&[3.0, 0.0]).unwrap();

        for observer in [&first, &second] {
            assert_eq!(*observer.attached.lock(), vec!["test_f001_i01_d02".to_string()]);
            let records = observer.records.lock();
            assert_eq!(records.len(), 2);
            assert_eq!(records[0].evaluation, 1);
            assert!(records[0].improved);
            assert_eq!(records[1].evaluation, 2);
            assert!(!records[1].improved);
        }

        problem.finish().unwrap();
        assert_eq!(*first.finished.lock(), 1);
        assert_eq!(problem.observer_count(), 0);
    }

    #[test]
    fn mismatched_initial_solution_is_rejected() {
        let bounds = Bounds::uniform(2, -1.0, 1.0).unwrap();
        let result = BenchmarkProblem::new(
            ProblemInfo::new("test", 1, 1, 2),
            bounds,
            Box::new(sphere),
            vec![0.0; 3],
        );
        assert!(result.is_err());
    }
}

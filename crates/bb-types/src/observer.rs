use serde::{Deserialize, Serialize};

use crate::errors::ObserverError;
use crate::problem::ProblemInfo;

/// One objective evaluation as delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// 1-based evaluation number on the problem.
    pub evaluation: u64,
    pub x: Vec<f64>,
    pub value: f64,
    /// Whether `value` is strictly better than every earlier evaluation.
    pub improved: bool,
}

/// A result-logging sink.
///
/// One observer is typically attached to every problem of a suite, so the
/// methods take `&self` and implementations keep their state behind a lock.
pub trait Observer: Send + Sync {
    fn name(&self) -> &str;

    /// Called once when the observer is attached to a problem.
    fn attach(&self, _problem: &ProblemInfo) -> Result<(), ObserverError> {
        Ok(())
    }

    /// Called after every evaluation of an observed problem.
    fn record(&self, problem: &ProblemInfo, record: &EvaluationRecord) -> Result<(), ObserverError>;

    /// Called once when the runner is done with a problem.
    fn finish(&self, _problem: &ProblemInfo) -> Result<(), ObserverError> {
        Ok(())
    }
}

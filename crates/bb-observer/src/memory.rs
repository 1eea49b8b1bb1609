use bb_types::{EvaluationRecord, Observer, ObserverError, ProblemInfo};
use parking_lot::Mutex;

use crate::options::ObserverOptions;

/// Everything one observer saw of one problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemLog {
    pub problem: ProblemInfo,
    pub records: Vec<EvaluationRecord>,
    pub finished: bool,
}

/// Keeps delivered evaluations in memory, grouped by problem in attach order.
#[derive(Debug)]
pub struct MemoryObserver {
    name: String,
    options: ObserverOptions,
    logs: Mutex<Vec<ProblemLog>>,
}

impl MemoryObserver {
    pub fn new(name: impl Into<String>, options: ObserverOptions) -> Self {
        Self {
            name: name.into(),
            options,
            logs: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of all problem logs.
    pub fn logs(&self) -> Vec<ProblemLog> {
        self.logs.lock().clone()
    }

    pub fn records_for(&self, problem_id: &str) -> Vec<EvaluationRecord> {
        self.logs
            .lock()
            .iter()
            .filter(|log| log.problem.id == problem_id)
            .flat_map(|log| log.records.iter().cloned())
            .collect()
    }

    pub fn total_records(&self) -> usize {
        self.logs.lock().iter().map(|log| log.records.len()).sum()
    }
}

impl Observer for MemoryObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, problem: &ProblemInfo) -> Result<(), ObserverError> {
        self.logs.lock().push(ProblemLog {
            problem: problem.clone(),
            records: Vec::new(),
            finished: false,
        });
        Ok(())
    }

    fn record(&self, problem: &ProblemInfo, record: &EvaluationRecord) -> Result<(), ObserverError> {
        if record.x.len() != problem.dimension {
            return Err(ObserverError::Rejected {
                observer: self.name.clone(),
                message: format!(
                    "{} variables for {}-dimensional problem {}",
                    record.x.len(),
                    problem.dimension,
                    problem.id
                ),
            });
        }
        if !self.options.accepts(record.improved) {
            return Ok(());
        }

        let mut logs = self.logs.lock();
        let log = logs
            .iter_mut()
            .rev()
            .find(|log| log.problem.id == problem.id && !log.finished)
            .ok_or_else(|| ObserverError::NotAttached {
                observer: self.name.clone(),
                problem: problem.id.clone(),
            })?;

        let mut kept = record.clone();
        if !self.options.keeps_variables(problem.dimension) {
            kept.x.clear();
        }
        log.records.push(kept);
        Ok(())
    }

    fn finish(&self, problem: &ProblemInfo) -> Result<(), ObserverError> {
        if let Some(log) = self
            .logs
            .lock()
            .iter_mut()
            .rev()
            .find(|log| log.problem.id == problem.id && !log.finished)
        {
            log.finished = true;
        }
        Ok(())
    }
}

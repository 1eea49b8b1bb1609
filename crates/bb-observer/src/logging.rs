use std::collections::HashMap;

use bb_types::{EvaluationRecord, Observer, ObserverError, ProblemInfo};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::options::ObserverOptions;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    delivered: u64,
    last_evaluation: u64,
    best: Option<f64>,
}

/// Reports evaluations as `tracing` events.
///
/// Attach and finish are logged at `info`, individual evaluations at `debug`.
#[derive(Debug)]
pub struct LoggingObserver {
    name: String,
    options: ObserverOptions,
    tallies: Mutex<HashMap<String, Tally>>,
}

impl LoggingObserver {
    pub fn new(name: impl Into<String>, options: ObserverOptions) -> Self {
        Self {
            name: name.into(),
            options,
            tallies: Mutex::new(HashMap::new()),
        }
    }

    fn result_folder(&self) -> &str {
        self.options.result_folder.as_deref().unwrap_or("-")
    }

    /// Formats `x` with `precision_x` significant digits.
    pub fn format_x(&self, x: &[f64]) -> String {
        let digits = self.options.precision_x.saturating_sub(1);
        let parts: Vec<String> = x.iter().map(|v| format!("{v:.digits$e}")).collect();
        format!("[{}]", parts.join(", "))
    }

    pub fn format_f(&self, value: f64) -> String {
        let digits = self.options.precision_f.saturating_sub(1);
        format!("{value:.digits$e}")
    }
}

impl Observer for LoggingObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn attach(&self, problem: &ProblemInfo) -> Result<(), ObserverError> {
        self.tallies.lock().insert(problem.id.clone(), Tally::default());
        info!(
            "[{}] observing {} (dimension {}) into {}",
            self.name,
            problem.id,
            problem.dimension,
            self.result_folder()
        );
        Ok(())
    }

    fn record(&self, problem: &ProblemInfo, record: &EvaluationRecord) -> Result<(), ObserverError> {
        let mut tallies = self.tallies.lock();
        let tally = tallies
            .get_mut(&problem.id)
            .ok_or_else(|| ObserverError::NotAttached {
                observer: self.name.clone(),
                problem: problem.id.clone(),
            })?;

        tally.last_evaluation = record.evaluation;
        if record.improved {
            tally.best = Some(record.value);
        }
        if !self.options.accepts(record.improved) {
            return Ok(());
        }
        tally.delivered += 1;

        if self.options.keeps_variables(problem.dimension) {
            debug!(
                "[{}] {} #{} f={} x={}",
                self.name,
                problem.id,
                record.evaluation,
                self.format_f(record.value),
                self.format_x(&record.x)
            );
        } else {
            debug!(
                "[{}] {} #{} f={}",
                self.name,
                problem.id,
                record.evaluation,
                self.format_f(record.value)
            );
        }
        Ok(())
    }

    fn finish(&self, problem: &ProblemInfo) -> Result<(), ObserverError> {
        if let Some(tally) = self.tallies.lock().remove(&problem.id) {
            info!(
                "[{}] {} done: {} evaluations, {} logged, best {}",
                self.name,
                problem.id,
                tally.last_evaluation,
                tally.delivered,
                tally
                    .best
                    .map(|b| self.format_f(b))
                    .unwrap_or_else(|| "n/a".to_string())
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_requested_precision() {
        let options = ObserverOptions::parse("precision_x: 1 precision_f: 3").unwrap();
        let observer = LoggingObserver::new("log", options);
        assert_eq!(observer.format_x(&[1234.0, -0.5]), "[1e3, -5e-1]");
        assert_eq!(observer.format_f(1234.0), "1.23e3");
    }

    #[test]
    fn records_require_attach() {
        let observer = LoggingObserver::new("log", ObserverOptions::default());
        let problem = ProblemInfo::new("s", 2, 1, 4);
        let record = EvaluationRecord {
            evaluation: 1,
            x: vec![0.0; 4],
            value: 1.0,
            improved: true,
        };
        assert!(observer.record(&problem, &record).is_err());

        observer.attach(&problem).unwrap();
        observer.record(&problem, &record).unwrap();
        observer.finish(&problem).unwrap();
        // A finished problem is detached again
        assert!(observer.record(&problem, &record).is_err());
    }
}

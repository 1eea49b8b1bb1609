use serde::{Deserialize, Serialize};

/// What one optimizer call spent and found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Evaluations performed during this call.
    pub evaluations: u64,
    pub best_x: Option<Vec<f64>>,
    pub best_value: Option<f64>,
}

impl RunOutcome {
    /// Counts an evaluation and keeps it if it is the best so far.
    pub fn observe(&mut self, x: &[f64], value: f64) {
        self.evaluations += 1;
        if self.best_value.map_or(true, |best| value < best) {
            self.best_value = Some(value);
            self.best_x = Some(x.to_vec());
        }
    }
}

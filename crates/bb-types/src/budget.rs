//! Per-problem evaluation budgets.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Maximum number of objective evaluations allowed on one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub max_evaluations: u64,
}

impl Budget {
    pub fn new(max_evaluations: u64) -> Self {
        Self { max_evaluations }
    }

    /// `dimension * multiplier`, rounded up to a whole evaluation.
    pub fn from_multiplier(dimension: usize, multiplier: f64) -> Result<Self, ConfigError> {
        validate_multiplier(multiplier)?;
        let max_evaluations = (dimension as f64 * multiplier).ceil() as u64;
        Ok(Self { max_evaluations })
    }

    /// Evaluations left after `evaluations` have been spent.
    pub fn remaining(&self, evaluations: u64) -> u64 {
        self.max_evaluations.saturating_sub(evaluations)
    }

    pub fn is_exhausted(&self, evaluations: u64) -> bool {
        evaluations >= self.max_evaluations
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.max_evaluations)
    }
}

/// A budget multiplier must be a finite, strictly positive number.
pub fn validate_multiplier(multiplier: f64) -> Result<(), ConfigError> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidBudgetMultiplier { value: multiplier })
    }
}

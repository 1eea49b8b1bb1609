use std::path::Path;

use bb_types::{BbResult, ConfigError};
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;

/// One benchmarking experiment: a suite selection, its observers, an
/// optimizer and the per-dimension budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub suite_name: String,
    /// Suite instance string, e.g. `year: 2018`.
    pub suite_instance: String,
    /// Filter options, e.g. `instance_indices: 1-3 dimensions: 10`.
    pub suite_options: String,
    pub observer_name: String,
    pub observer_options: String,
    /// Second observer, recording every evaluation by default. An empty
    /// name disables it.
    pub add_observer_name: String,
    pub add_observer_options: String,
    /// `cma`, `rs` or `lhs`. Kept as text so a bad value is reported by the
    /// runner before any evaluation rather than when the file is loaded.
    pub alg: String,
    /// Evaluations allowed per problem dimension.
    pub budget_multiplier: f64,
    /// Seeds every RNG of the run when set.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            suite_name: bb_suite::DEFAULT_SUITE.to_string(),
            suite_instance: String::new(),
            suite_options: String::new(),
            observer_name: "log".to_string(),
            observer_options: String::new(),
            add_observer_name: "memory".to_string(),
            add_observer_options: "log_only_better: 0 log_variables: all".to_string(),
            alg: Algorithm::Cma.as_str().to_string(),
            budget_multiplier: 10.0,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn new(suite_name: impl Into<String>, alg: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
            alg: alg.into(),
            ..Self::default()
        }
    }

    pub fn with_suite_instance(mut self, instance: impl Into<String>) -> Self {
        self.suite_instance = instance.into();
        self
    }

    pub fn with_suite_options(mut self, options: impl Into<String>) -> Self {
        self.suite_options = options.into();
        self
    }

    pub fn with_observer(mut self, name: impl Into<String>, options: impl Into<String>) -> Self {
        self.observer_name = name.into();
        self.observer_options = options.into();
        self
    }

    pub fn with_additional_observer(
        mut self,
        name: impl Into<String>,
        options: impl Into<String>,
    ) -> Self {
        self.add_observer_name = name.into();
        self.add_observer_options = options.into();
        self
    }

    pub fn with_budget_multiplier(mut self, multiplier: f64) -> Self {
        self.budget_multiplier = multiplier;
        self
    }

    pub fn without_additional_observer(mut self) -> Self {
        self.add_observer_name.clear();
        self.add_observer_options.clear();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn has_additional_observer(&self) -> bool {
        !self.add_observer_name.is_empty()
    }

    /// Parses the algorithm selector.
    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        self.alg.parse()
    }

    /// Result folder for `observer`: `<suite>-<alg>-<observer>`.
    pub fn result_folder(&self, observer: &str) -> String {
        format!("{}-{}-{}", self.suite_name, self.alg, observer)
    }

    /// Observer options with the result folder prepended, so an explicit
    /// `result_folder` in `options` still wins.
    pub fn observer_options_for(&self, observer: &str, options: &str) -> String {
        let folder = format!("result_folder: {}", self.result_folder(observer));
        if options.trim().is_empty() {
            folder
        } else {
            format!("{folder} {options}")
        }
    }

    /// Reads a JSON list of experiments.
    pub fn load_list(path: impl AsRef<Path>) -> BbResult<Vec<ExperimentConfig>> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// The three stock experiments: CMA-ES on a 128-dimensional selection with
/// a full-trajectory second observer, then random search and CMA-ES on a
/// 10-dimensional function subset.
pub fn default_experiments() -> Vec<ExperimentConfig> {
    let subset = "function_indices: 3,6,9,12,15,18,21,24,27,30,33,36,39,42 \
                  instance_indices: 1 dimensions: 10";
    vec![
        ExperimentConfig::new("rw-top-trumps", "cma")
            .with_suite_options("instance_indices: 1-3 dimensions: 128")
            .with_additional_observer("memory", "log_only_better: 0 log_variables: all precision_x: 1")
            .with_budget_multiplier(50.0),
        ExperimentConfig::new("rw-gan-mario", "rs")
            .with_suite_options(subset)
            .with_budget_multiplier(20.0),
        ExperimentConfig::new("rw-gan-mario", "cma")
            .with_suite_options(subset)
            .with_budget_multiplier(50.0),
    ]
}

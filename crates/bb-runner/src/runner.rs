// Experiment runner
// Iterates a suite, attaches observers and spends each problem's budget with
// the selected strategy.

use std::io::Write;
use std::sync::Arc;

use bb_observer::ObserverRegistry;
use bb_suite::SuiteRegistry;
use bb_types::{validate_multiplier, BbResult, Budget, Observer, Problem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::algorithm::Algorithm;
use crate::config::ExperimentConfig;
use crate::progress::ProgressPrinter;

/// What one problem consumed and reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: String,
    pub dimension: usize,
    pub evaluations: u64,
    pub budget: u64,
    pub best_value: Option<f64>,
}

/// Outcome of one experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub run_id: Uuid,
    pub suite_name: String,
    pub algorithm: Algorithm,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub problems: Vec<ProblemSummary>,
}

impl ExperimentSummary {
    pub fn total_evaluations(&self) -> u64 {
        self.problems.iter().map(|p| p.evaluations).sum()
    }

    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Runs experiments against registered suites and observers.
pub struct ExperimentRunner {
    suites: SuiteRegistry,
    observers: ObserverRegistry,
}

impl ExperimentRunner {
    pub fn new() -> Self {
        Self::with_registries(SuiteRegistry::new(), ObserverRegistry::new())
    }

    pub fn with_registries(suites: SuiteRegistry, observers: ObserverRegistry) -> Self {
        Self { suites, observers }
    }

    pub fn suites(&self) -> &SuiteRegistry {
        &self.suites
    }

    pub fn observers_mut(&mut self) -> &mut ObserverRegistry {
        &mut self.observers
    }

    /// Runs every problem of the configured suite once, in suite order,
    /// writing one progress line per problem to `out`.
    ///
    /// The algorithm and the budget multiplier are validated before the
    /// suite is opened, so a bad configuration never evaluates anything.
    pub fn run<W: Write>(&mut self, config: &ExperimentConfig, out: W) -> BbResult<ExperimentSummary> {
        let algorithm = config.algorithm()?;
        validate_multiplier(config.budget_multiplier)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            "Experiment {}: {} on suite {} with budget multiplier {}",
            run_id, algorithm, config.suite_name, config.budget_multiplier
        );

        let suite = self.suites.open(
            &config.suite_name,
            &config.suite_instance,
            &config.suite_options,
        )?;
        let observers = self.open_observers(config)?;

        let mut progress = ProgressPrinter::new(out, suite.len());
        let mut problems = Vec::with_capacity(suite.len());
        for problem in suite.problems() {
            let mut problem = problem?;
            for observer in &observers {
                problem.observe_with(observer.clone())?;
            }

            let budget = Budget::from_multiplier(problem.dimension(), config.budget_multiplier)?;
            let seed = config
                .seed
                .map(|seed| seed.wrapping_add(problem.info().index as u64));
            let mut strategy = algorithm.strategy(seed);
            debug!(
                "Optimizing {} with {} (budget {})",
                problem.info().id,
                strategy.name(),
                budget
            );
            strategy.optimize(&mut problem, budget)?;
            problem.finish()?;

            let last = problem.info().index + 1 == suite.len();
            progress.print(&problem, last)?;
            problems.push(ProblemSummary {
                id: problem.info().id.clone(),
                dimension: problem.dimension(),
                evaluations: problem.evaluations(),
                budget: budget.max_evaluations,
                best_value: problem.best_observed_value(),
            });
        }

        let summary = ExperimentSummary {
            run_id,
            suite_name: config.suite_name.clone(),
            algorithm,
            started_at,
            finished_at: Utc::now(),
            problems,
        };
        info!(
            "Experiment {} finished: {} problems, {} evaluations in {:.1}s",
            summary.run_id,
            summary.problems.len(),
            summary.total_evaluations(),
            summary.duration_secs()
        );
        Ok(summary)
    }

    /// Opens the main observer and, if configured, the additional one. Each
    /// gets its own `<suite>-<alg>-<observer>` result folder.
    fn open_observers(&self, config: &ExperimentConfig) -> BbResult<Vec<Arc<dyn Observer>>> {
        let mut observers = Vec::with_capacity(2);
        let options = config.observer_options_for(&config.observer_name, &config.observer_options);
        observers.push(self.observers.open(&config.observer_name, &options)?);

        if config.has_additional_observer() {
            let options = config
                .observer_options_for(&config.add_observer_name, &config.add_observer_options);
            observers.push(self.observers.open(&config.add_observer_name, &options)?);
        }
        Ok(observers)
    }
}

impl Default for ExperimentRunner {
    fn default() -> Self {
        Self::new()
    }
}

//! Suites: ordered, filtered collections of benchmark problems.

use std::sync::Arc;

use bb_types::options::{parse_index_list, parse_usize};
use bb_types::{BbResult, ConfigError, OptionList, ProblemInfo};
use tracing::{debug, warn};

use crate::problem::BenchmarkProblem;

/// Produces the problems of one family of benchmark functions.
pub trait SuiteBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Function numbers the backend provides, in suite order.
    fn functions(&self) -> Vec<usize>;

    fn default_dimensions(&self) -> Vec<usize>;

    fn default_instances(&self) -> Vec<usize>;

    fn supports_dimension(&self, dimension: usize) -> bool;

    /// Instance string used when the caller passes an empty one.
    fn default_instance(&self) -> &str {
        ""
    }

    /// Instances making up the benchmark year `year`, if the backend knows it.
    fn year_instances(&self, _year: usize) -> Option<Vec<usize>> {
        None
    }

    /// Builds the problem described by `info`.
    fn build(&self, info: ProblemInfo) -> BbResult<BenchmarkProblem>;
}

const SUITE_OPTION_KEYS: [&str; 4] = [
    "function_indices",
    "instance_indices",
    "dimensions",
    "dimension_indices",
];

const SUITE_INSTANCE_KEYS: [&str; 2] = ["year", "instances"];

/// Filters parsed from a suite options string such as
/// `instance_indices: 1-3 dimensions: 128`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteOptions {
    pub function_indices: Option<Vec<usize>>,
    pub instance_indices: Option<Vec<usize>>,
    pub dimensions: Option<Vec<usize>>,
    /// 1-based positions into the backend's default dimensions.
    pub dimension_indices: Option<Vec<usize>>,
}

impl SuiteOptions {
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let options = OptionList::parse(input)?;
        options.ensure_known("suite", &SUITE_OPTION_KEYS)?;

        let list = |key: &str| -> Result<Option<Vec<usize>>, ConfigError> {
            options.get(key).map(|v| parse_index_list(key, v)).transpose()
        };

        Ok(Self {
            function_indices: list("function_indices")?,
            instance_indices: list("instance_indices")?,
            dimensions: list("dimensions")?,
            dimension_indices: list("dimension_indices")?,
        })
    }
}

/// The suite instance string, e.g. `year: 2018` or `instances: 1-5`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteInstance {
    pub year: Option<usize>,
    pub instances: Option<Vec<usize>>,
}

impl SuiteInstance {
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let options = OptionList::parse(input)?;
        options.ensure_known("suite instance", &SUITE_INSTANCE_KEYS)?;
        Ok(Self {
            year: options.get("year").map(|v| parse_usize("year", v)).transpose()?,
            instances: options
                .get("instances")
                .map(|v| parse_index_list("instances", v))
                .transpose()?,
        })
    }
}

/// An ordered sequence of problems. Problems are built lazily, one at a time,
/// so a suite can be iterated without holding every objective in memory.
pub struct Suite {
    name: String,
    backend: Arc<dyn SuiteBackend>,
    problems: Vec<ProblemInfo>,
}

impl Suite {
    /// Resolves the problem list of `backend` under the given instance and
    /// filter strings. Order is dimension-major, then function, then instance.
    pub fn new(
        name: impl Into<String>,
        backend: Arc<dyn SuiteBackend>,
        instance: &str,
        options: &str,
    ) -> BbResult<Self> {
        let name = name.into();
        let instance = if instance.trim().is_empty() {
            backend.default_instance()
        } else {
            instance
        };
        let instance = SuiteInstance::parse(instance)?;
        let options = SuiteOptions::parse(options)?;

        let dimensions = select_dimensions(&name, backend.as_ref(), &options)?;
        let functions = select_functions(&name, backend.as_ref(), &options);
        let by_year = instance.year.and_then(|year| {
            let instances = backend.year_instances(year);
            if instances.is_none() {
                debug!("Suite {} has no instance set for year {}, using defaults", name, year);
            }
            instances
        });
        let instances = options
            .instance_indices
            .clone()
            .or(instance.instances)
            .or(by_year)
            .unwrap_or_else(|| backend.default_instances());

        let mut problems = Vec::with_capacity(dimensions.len() * functions.len() * instances.len());
        for &dimension in &dimensions {
            for &function in &functions {
                for &instance in &instances {
                    let index = problems.len();
                    problems.push(
                        ProblemInfo::new(name.as_str(), function, instance, dimension)
                            .with_index(index),
                    );
                }
            }
        }

        if problems.is_empty() {
            warn!("Suite {} selects no problems with options '{:?}'", name, options);
        }

        Ok(Self {
            name,
            backend,
            problems,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problem_infos(&self) -> &[ProblemInfo] {
        &self.problems
    }

    /// Builds the problem at `index` with a fresh evaluation counter.
    pub fn get_problem(&self, index: usize) -> BbResult<BenchmarkProblem> {
        let info = self.problems.get(index).cloned().ok_or_else(|| {
            ConfigError::Invalid(format!(
                "problem index {index} out of range for suite {} with {} problems",
                self.name,
                self.problems.len()
            ))
        })?;
        self.backend.build(info)
    }

    /// Iterates the problems in suite order.
    pub fn problems(&self) -> impl Iterator<Item = BbResult<BenchmarkProblem>> + '_ {
        self.problems
            .iter()
            .map(move |info| self.backend.build(info.clone()))
    }
}

impl std::fmt::Debug for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("backend", &self.backend.name())
            .field("problems", &self.problems.len())
            .finish()
    }
}

fn select_dimensions(
    suite: &str,
    backend: &dyn SuiteBackend,
    options: &SuiteOptions,
) -> Result<Vec<usize>, ConfigError> {
    if let Some(dimensions) = &options.dimensions {
        if options.dimension_indices.is_some() {
            warn!("Suite {}: dimensions given, ignoring dimension_indices", suite);
        }
        if let Some(bad) = dimensions.iter().find(|d| !backend.supports_dimension(**d)) {
            return Err(ConfigError::InvalidOptionValue {
                key: "dimensions".to_string(),
                value: bad.to_string(),
                message: format!("suite {suite} cannot build problems of this dimension"),
            });
        }
        return Ok(dimensions.clone());
    }

    let defaults = backend.default_dimensions();
    match &options.dimension_indices {
        Some(indices) => indices
            .iter()
            .map(|&i| {
                i.checked_sub(1)
                    .and_then(|zero_based| defaults.get(zero_based).copied())
                    .ok_or_else(|| ConfigError::InvalidOptionValue {
                        key: "dimension_indices".to_string(),
                        value: i.to_string(),
                        message: format!("suite {suite} has {} default dimensions", defaults.len()),
                    })
            })
            .collect(),
        None => Ok(defaults),
    }
}

fn select_functions(suite: &str, backend: &dyn SuiteBackend, options: &SuiteOptions) -> Vec<usize> {
    let available = backend.functions();
    match &options.function_indices {
        Some(requested) => requested
            .iter()
            .copied()
            .filter(|f| {
                let known = available.contains(f);
                if !known {
                    warn!("Suite {} has no function {}, skipping it", suite, f);
                }
                known
            })
            .collect(),
        None => available,
    }
}

use std::fmt;
use std::str::FromStr;

use bb_optimizer::{ChunkedRandomSearch, ClassicLhs, CmaesBackend};
use bb_types::ConfigError;
use serde::{Deserialize, Serialize};

use crate::strategy::{CmaRestarts, LhsStrategy, OptimizeStrategy, RandomSearchStrategy};

/// Optimizer family selected by the `alg` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// CMA-ES with restarts (`cma`)
    Cma,
    /// Pure random search (`rs`)
    RandomSearch,
    /// Latin Hypercube Sampling (`lhs`)
    LatinHypercube,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Cma,
        Algorithm::RandomSearch,
        Algorithm::LatinHypercube,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Cma => "cma",
            Algorithm::RandomSearch => "rs",
            Algorithm::LatinHypercube => "lhs",
        }
    }

    /// Builds the per-problem strategy backed by the default adapters.
    /// A seed makes every RNG the strategy owns deterministic.
    pub fn strategy(&self, seed: Option<u64>) -> Box<dyn OptimizeStrategy> {
        match self {
            Algorithm::Cma => Box::new(CmaRestarts::new(CmaesBackend::new(), seed)),
            Algorithm::RandomSearch => {
                Box::new(RandomSearchStrategy::new(ChunkedRandomSearch::new(seed)))
            }
            Algorithm::LatinHypercube => Box::new(LhsStrategy::new(ClassicLhs::new(seed))),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cma" => Ok(Algorithm::Cma),
            "rs" => Ok(Algorithm::RandomSearch),
            "lhs" => Ok(Algorithm::LatinHypercube),
            other => Err(ConfigError::UnknownAlgorithm {
                name: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Observer configuration parsed from `key: value` option strings.

use std::collections::BTreeMap;

use bb_types::options::{parse_flag, parse_usize};
use bb_types::{ConfigError, OptionList};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which decision variables are kept with each logged evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogVariables {
    None,
    /// Only when the dimension is at most `low_dim_vars`.
    LowDim,
    All,
}

impl std::str::FromStr for LogVariables {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "low_dim" => Ok(Self::LowDim),
            "all" => Ok(Self::All),
            other => Err(ConfigError::InvalidOptionValue {
                key: "log_variables".to_string(),
                value: other.to_string(),
                message: "expected none, low_dim or all".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Destination the observer reports under.
    pub result_folder: Option<String>,
    /// Deliver only evaluations that improve the best-so-far value.
    pub log_only_better: bool,
    pub log_variables: LogVariables,
    pub low_dim_vars: usize,
    /// Significant digits for decision variables.
    pub precision_x: usize,
    /// Significant digits for objective values.
    pub precision_f: usize,
    /// Keys this crate does not interpret, kept verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            result_folder: None,
            log_only_better: true,
            log_variables: LogVariables::LowDim,
            low_dim_vars: 10,
            precision_x: 8,
            precision_f: 15,
            extra: BTreeMap::new(),
        }
    }
}

impl ObserverOptions {
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        for (key, value) in OptionList::parse(input)?.iter() {
            match key {
                "result_folder" => options.result_folder = Some(value.to_string()),
                "log_only_better" => options.log_only_better = parse_flag(key, value)?,
                "log_variables" => options.log_variables = value.parse()?,
                "low_dim_vars" => options.low_dim_vars = parse_usize(key, value)?,
                "precision_x" => options.precision_x = parse_usize(key, value)?,
                "precision_f" => options.precision_f = parse_usize(key, value)?,
                _ => {
                    warn!("Unrecognized observer option {}: {}", key, value);
                    options.extra.insert(key.to_string(), value.to_string());
                }
            }
        }
        Ok(options)
    }

    /// Whether the decision vector of a `dimension`-variable problem is kept.
    pub fn keeps_variables(&self, dimension: usize) -> bool {
        match self.log_variables {
            LogVariables::None => false,
            LogVariables::LowDim => dimension <= self.low_dim_vars,
            LogVariables::All => true,
        }
    }

    /// Whether an evaluation should be delivered at all.
    pub fn accepts(&self, improved: bool) -> bool {
        improved || !self.log_only_better
    }
}

use thiserror::Error;

/// Main error type for the BlackBench system
#[derive(Error, Debug)]
pub enum BbError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Problem error: {0}")]
    Problem(#[from] ProblemError),

    #[error("Observer error: {0}")]
    Observer(#[from] ObserverError),

    #[error("Optimizer error: {0}")]
    Optimizer(#[from] OptimizerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration errors, raised before any objective evaluation happens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown algorithm: {name} (expected one of cma, rs, lhs)")]
    UnknownAlgorithm { name: String },

    #[error("Invalid budget multiplier: {value} (must be finite and positive)")]
    InvalidBudgetMultiplier { value: f64 },

    #[error("Unknown observer: {name}")]
    UnknownObserver { name: String },

    #[error("Unknown {context} option: {key}")]
    UnknownOptionKey { context: String, key: String },

    #[error("Missing value for option: {key}")]
    MissingOptionValue { key: String },

    #[error("Invalid value for option {key}: {value} ({message})")]
    InvalidOptionValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Errors raised by a problem while it is being built or evaluated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    #[error("Dimension mismatch: expected {expected} variables, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid bounds: {message}")]
    InvalidBounds { message: String },

    #[error("Unknown function {function} in suite {suite}")]
    UnknownFunction { suite: String, function: usize },

    #[error("Unsupported dimension {dimension} in suite {suite}")]
    UnsupportedDimension { suite: String, dimension: usize },
}

/// Errors raised by result observers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObserverError {
    #[error("Observer {observer} is not attached to problem {problem}")]
    NotAttached { observer: String, problem: String },

    #[error("Observer {observer} rejected record: {message}")]
    Rejected { observer: String, message: String },
}

/// Errors raised by optimizer adapters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Invalid {optimizer} options: {message}")]
    InvalidOptions { optimizer: String, message: String },

    #[error("{optimizer} made no progress: evaluation counter stuck at {evaluations}")]
    Stalled { optimizer: String, evaluations: u64 },

    #[error("{optimizer} design exhausted after {used} of {requested} points")]
    DesignExhausted {
        optimizer: String,
        used: usize,
        requested: u64,
    },
}

/// Result type alias for BlackBench operations
pub type BbResult<T> = Result<T, BbError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::BbError::Config($crate::ConfigError::Invalid(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::UnknownAlgorithm {
            name: "unknown".to_string(),
        };

        assert!(error.to_string().contains("Unknown algorithm"));
        assert!(error.to_string().contains("unknown"));
        assert!(error.to_string().contains("cma, rs, lhs"));
    }

    #[test]
    fn test_error_conversion() {
        let problem_error = ProblemError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        let bb_error: BbError = problem_error.into();

        match bb_error {
            BbError::Problem(ProblemError::DimensionMismatch { expected: 3, actual: 2 }) => (),
            other => panic!("Expected Problem error, got {other:?}"),
        }
    }

    #[test]
    fn test_macros() {
        let config_err = config_error!("Missing required field: {}", "suite_name");
        assert!(matches!(config_err, BbError::Config(ConfigError::Invalid(_))));
        assert!(config_err.to_string().contains("suite_name"));
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use bb_types::{BbResult, ConfigError, EvaluationRecord, Observer, ObserverError, ProblemInfo};
use tracing::debug;

use crate::logging::LoggingObserver;
use crate::memory::MemoryObserver;
use crate::options::ObserverOptions;

/// Builds an observer from its registered name and parsed options.
pub type ObserverFactory = Arc<dyn Fn(&str, ObserverOptions) -> Arc<dyn Observer> + Send + Sync>;

/// Observer that drops everything.
#[derive(Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn name(&self) -> &str {
        "none"
    }

    fn record(&self, _problem: &ProblemInfo, _record: &EvaluationRecord) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Opens observers by name. `log`, `memory` and `none` are built in.
pub struct ObserverRegistry {
    factories: HashMap<String, ObserverFactory>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("log", Arc::new(|name: &str, options: ObserverOptions| {
            Arc::new(LoggingObserver::new(name, options)) as Arc<dyn Observer>
        }));
        registry.register("memory", Arc::new(|name: &str, options: ObserverOptions| {
            Arc::new(MemoryObserver::new(name, options)) as Arc<dyn Observer>
        }));
        registry.register("none", Arc::new(|_: &str, _: ObserverOptions| {
            Arc::new(NullObserver) as Arc<dyn Observer>
        }));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, factory: ObserverFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Parses `options` and builds the observer registered as `name`.
    pub fn open(&self, name: &str, options: &str) -> BbResult<Arc<dyn Observer>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownObserver {
                name: name.to_string(),
            })?;
        let parsed = ObserverOptions::parse(options)?;
        debug!("Opening observer {} with options '{}'", name, options);
        Ok(factory(name, parsed))
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bb_types::BbError;

    #[test]
    fn builtin_observers_open() {
        let registry = ObserverRegistry::new();
        for name in ["log", "memory", "none"] {
            let observer = registry.open(name, "result_folder: out").unwrap();
            assert_eq!(observer.name(), name);
        }
    }

    #[test]
    fn unknown_observer_is_config_error() {
        let registry = ObserverRegistry::new();
        let err = registry.open("bbob-biobj", "").err().unwrap();
        assert!(matches!(
            err,
            BbError::Config(ConfigError::UnknownObserver { .. })
        ));
    }

    #[test]
    fn bad_options_fail_to_open() {
        let registry = ObserverRegistry::new();
        assert!(registry.open("log", "precision_x:").is_err());
    }

    #[test]
    fn custom_factories_can_share_an_instance() {
        let shared = Arc::new(MemoryObserver::new("shared", ObserverOptions::default()));
        let mut registry = ObserverRegistry::new();
        let handle = shared.clone();
        registry.register(
            "shared",
            Arc::new(move |_: &str, _: ObserverOptions| handle.clone() as Arc<dyn Observer>),
        );

        let opened = registry.open("shared", "").unwrap();
        let problem = ProblemInfo::new("s", 1, 1, 2);
        opened.attach(&problem).unwrap();
        assert_eq!(shared.logs().len(), 1);
    }
}

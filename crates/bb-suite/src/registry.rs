use std::collections::HashMap;
use std::sync::Arc;

use bb_types::BbResult;
use tracing::info;

use crate::analytic::AnalyticBackend;
use crate::mixint::MixintBackend;
use crate::suite::{Suite, SuiteBackend};

/// Name under which the analytic backend is always registered.
pub const DEFAULT_SUITE: &str = "analytic";

/// Maps suite names to the backends that build their problems.
///
/// Names that were never registered are bound to the fallback backend the
/// first time they are looked up; repeated lookups return the same binding.
pub struct SuiteRegistry {
    backends: HashMap<String, Arc<dyn SuiteBackend>>,
    fallback: Arc<dyn SuiteBackend>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        let fallback: Arc<dyn SuiteBackend> = Arc::new(AnalyticBackend::new());
        let mut backends = HashMap::new();
        backends.insert(DEFAULT_SUITE.to_string(), fallback.clone());
        let mixint: Arc<dyn SuiteBackend> = Arc::new(MixintBackend::new());
        backends.insert(mixint.name().to_string(), mixint);
        Self { backends, fallback }
    }

    /// Binds `name` to `backend`, returning the previous binding.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        backend: Arc<dyn SuiteBackend>,
    ) -> Option<Arc<dyn SuiteBackend>> {
        self.backends.insert(name.into(), backend)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Looks `name` up, binding it to the fallback backend if it is unknown.
    pub fn ensure_registered(&mut self, name: &str) -> Arc<dyn SuiteBackend> {
        let fallback = &self.fallback;
        self.backends
            .entry(name.to_string())
            .or_insert_with(|| {
                info!(
                    "Registering unknown suite {} on the {} backend",
                    name,
                    fallback.name()
                );
                fallback.clone()
            })
            .clone()
    }

    /// Sorted list of registered suite names.
    pub fn known_suite_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Opens the suite `name` with an instance string and a filter string.
    pub fn open(&mut self, name: &str, instance: &str, options: &str) -> BbResult<Suite> {
        let backend = self.ensure_registered(name);
        let suite = Suite::new(name, backend, instance, options)?;
        info!(
            "Opened suite {} with {} problems (options: '{}')",
            name,
            suite.len(),
            options
        );
        Ok(suite)
    }
}

impl Default for SuiteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

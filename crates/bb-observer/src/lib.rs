//! # bb-observer
//!
//! Result observers for BlackBench.
//!
//! Observers receive every evaluation of the problems they are attached to.
//! This crate provides option parsing, an in-memory recorder, a `tracing`
//! logger, and a registry that opens observers by name.

mod logging;
mod memory;
mod options;
mod registry;

pub use logging::LoggingObserver;
pub use memory::{MemoryObserver, ProblemLog};
pub use options::{LogVariables, ObserverOptions};
pub use registry::{NullObserver, ObserverFactory, ObserverRegistry};

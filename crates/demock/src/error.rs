//! Error types for the filter engine.

/// Errors raised while building a chain or filtering a call.
///
/// All of these indicate a configuration or fixture-authoring bug. Runtime
/// conditions such as a missing array target are never errors.
#[derive(Debug, thiserror::Error)]
pub enum DemockError {
    #[error("Invalid comparator '{spec}' for parameter '{param}'")]
    InvalidComparator { param: String, spec: String },
    #[error("Array filter must be an object mapping parameter names to comparators, got {0}")]
    InvalidArrayFilter(String),
    #[error("Fixture still unwrapping after {limit} passes")]
    PassLimitExceeded { limit: usize },
    #[error("Filter unit '{0}' has neither a request nor a response hook")]
    EmptyFilterUnit(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to load fixture {path}: {message}")]
    Fixture { path: String, message: String },
}

/// Result alias used throughout the crate.
pub type Result<T, E = DemockError> = std::result::Result<T, E>;

//! Error types for marga-nav

use thiserror::Error;

/// Top-level error type for engine infrastructure failures.
///
/// A pathfinding search that finds no route is not an error; it completes
/// normally with an empty waypoint list. Only infrastructure faults (pool
/// construction, configuration loading) surface here.
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("worker pool error: {0}")]
    Pool(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;

/// Failure of a single submitted computation.
///
/// Captured per task at drain time and reported through the event channel;
/// never allowed to crash the worker pool or the drain loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The task body panicked; the payload message is preserved when it was a string.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task reported a failure of its own.
    #[error("task failed: {0}")]
    Failed(String),
}

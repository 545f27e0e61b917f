//! Error types for resource acquisition and scheduler operations.

use thiserror::Error;

/// Failures raised while a project claims its tools and materials.
///
/// These never escape [`Project::execute`](crate::core::Project::execute); they
/// are logged and turn the project `Failed`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    /// The tool has broken down and cannot be adapted or acquired.
    #[error("tool `{0}` is not operational")]
    NotOperational(String),
    /// The material holds less than the requested amount.
    #[error("not enough `{name}`: requested {requested}, available {available}")]
    InsufficientQuantity {
        /// Material name.
        name: String,
        /// Amount asked for.
        requested: f64,
        /// Amount on hand when the request was made.
        available: f64,
    },
    /// A blueprint refers to a resource that no longer exists.
    #[error("invalid {0} reference")]
    InvalidReference(&'static str),
    /// The project was created without a blueprint.
    #[error("project `{0}` has no blueprint")]
    MissingBlueprint(String),
    /// Negative or non-finite quantity passed to a material operation.
    #[error("invalid amount: {0}")]
    InvalidAmount(f64),
}

/// Errors produced by the scheduler itself.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The queue reached its configured depth.
    #[error("queue full: {0}")]
    QueueFull(String),
    /// Shutdown was requested; no further submissions are accepted.
    #[error("scheduler has been shut down")]
    Shutdown,
    /// The worker thread could not be started.
    #[error("failed to spawn worker: {0}")]
    WorkerSpawn(String),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

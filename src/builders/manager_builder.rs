//! Builder to construct a project manager from configuration.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::SchedulerConfig;
use crate::core::{
    audit_listener, AuditSink, Listener, ManagerEvent, ProjectManager, ProjectView,
    SchedulerError,
};

/// Collects configuration and listeners, then starts the worker.
///
/// Listeners added here are in place before the worker thread exists.
#[derive(Default)]
pub struct ProjectManagerBuilder {
    config: SchedulerConfig,
    listeners: Vec<Listener>,
}

impl ProjectManagerBuilder {
    /// Start from the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a listener.
    #[must_use]
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(ManagerEvent, &ProjectView) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Record every event into `sink`.
    #[must_use]
    pub fn with_audit<S>(self, sink: Arc<Mutex<S>>) -> Self
    where
        S: AuditSink + 'static,
    {
        self.with_listener(audit_listener(sink))
    }

    /// Validate the configuration and start the manager.
    ///
    /// # Errors
    ///
    /// Same as [`ProjectManager::new`].
    pub fn build(self) -> Result<ProjectManager, SchedulerError> {
        ProjectManager::start(self.config, self.listeners)
    }
}

/// Build a manager from configuration with no listeners.
///
/// # Errors
///
/// Same as [`ProjectManager::new`].
pub fn build_manager(cfg: &SchedulerConfig) -> Result<ProjectManager, SchedulerError> {
    ProjectManagerBuilder::new().with_config(cfg.clone()).build()
}

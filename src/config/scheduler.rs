//! Scheduler configuration structures.

use std::env;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Environment key for the worker thread name.
pub const ENV_WORKER_NAME: &str = "FORGE_WORKER_NAME";
/// Environment key for the worker stack size in bytes.
pub const ENV_STACK_SIZE: &str = "FORGE_STACK_SIZE";
/// Environment key for the queue depth bound.
pub const ENV_MAX_QUEUE_DEPTH: &str = "FORGE_MAX_QUEUE_DEPTH";

const DEFAULT_WORKER_NAME: &str = "forge-worker";
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;
const MIN_STACK_SIZE: usize = 64 * 1024;

/// Settings for a [`ProjectManager`](crate::core::ProjectManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Name given to the worker OS thread.
    pub worker_name: String,
    /// Worker thread stack size in bytes.
    pub thread_stack_size: usize,
    /// Reject submissions once this many projects are pending. `None` is unbounded.
    pub max_queue_depth: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_name: DEFAULT_WORKER_NAME.to_string(),
            thread_stack_size: DEFAULT_STACK_SIZE,
            max_queue_depth: None,
        }
    }
}

impl SchedulerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread name.
    #[must_use]
    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }

    /// Set the worker stack size in bytes.
    #[must_use]
    pub fn with_thread_stack_size(mut self, bytes: usize) -> Self {
        self.thread_stack_size = bytes;
        self
    }

    /// Bound the number of pending projects.
    #[must_use]
    pub fn with_max_queue_depth(mut self, depth: usize) -> Self {
        self.max_queue_depth = Some(depth);
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_name.trim().is_empty() {
            return Err("worker_name must not be empty".into());
        }
        if self.worker_name.contains('\0') {
            return Err("worker_name must not contain NUL bytes".into());
        }
        if self.thread_stack_size < MIN_STACK_SIZE {
            return Err(format!(
                "thread_stack_size must be at least {MIN_STACK_SIZE} bytes"
            ));
        }
        if self.max_queue_depth == Some(0) {
            return Err("max_queue_depth must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a message for malformed JSON or invalid values.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading a `.env`
    /// file first when present. Unset keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails when a numeric key does not parse or the result is invalid.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();

        if let Ok(name) = env::var(ENV_WORKER_NAME) {
            cfg.worker_name = name;
        }
        if let Ok(raw) = env::var(ENV_STACK_SIZE) {
            cfg.thread_stack_size = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_STACK_SIZE}={raw} is not a byte count"))?;
        }
        if let Ok(raw) = env::var(ENV_MAX_QUEUE_DEPTH) {
            let depth = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_MAX_QUEUE_DEPTH}={raw} is not a depth"))?;
            cfg.max_queue_depth = Some(depth);
        }

        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

//! Tracing setup for binaries and demos embedding the scheduler.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "project_forge=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Like [`init_tracing`] with a caller-chosen fallback filter.
///
/// Thread names are included in every line, so worker-side events
/// (`forge-worker` by default) are told apart from the submitting threads.
pub fn init_tracing_with(fallback: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing_with("project_forge=debug");
        init_tracing();
        assert!(tracing::dispatcher::has_been_set());
    }
}

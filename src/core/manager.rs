//! Priority scheduler with a single background worker and synchronous listeners.
//!
//! The manager owns a priority queue guarded by a `parking_lot::Mutex` and one
//! worker thread that sleeps on a `Condvar` until a submission or shutdown
//! arrives. Exactly one project executes at a time, which is what keeps the
//! unsynchronized acquire-then-use sequence on shared tools and materials
//! safe: adding workers would require per-resource locking.
//!
//! # Events
//!
//! Listeners run synchronously on the thread that raises the event: the
//! submitting thread for `Enqueued`, the worker for `Started`, `Completed` and
//! `Failed`. A slow listener stalls that thread and a panicking listener is not
//! contained. Listeners are invoked on a snapshot of the registry taken
//! outside the queue lock, so they may call back into the manager.
//!
//! # Shutdown
//!
//! [`ProjectManager::shutdown`] (also run on drop) raises the stop flag, wakes
//! the worker and joins it. Projects still queued are discarded without any
//! event. The project currently executing, if any, runs to completion first.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};

use crossbeam_channel::{unbounded, Receiver};
use parking_lot::{Condvar, Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::core::{Project, ProjectStatus, ProjectView, SchedulerError};
use crate::infra::InMemoryQueue;
use crate::util::now_ms;

/// Lifecycle notifications emitted by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerEvent {
    /// The project was accepted into the queue.
    Enqueued,
    /// The worker picked the project up.
    Started,
    /// The project finished `Completed`.
    Completed,
    /// The project finished `Failed`.
    Failed,
}

impl fmt::Display for ManagerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Enqueued => "enqueued",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Callback invoked for every event.
pub type Listener = Arc<dyn Fn(ManagerEvent, &ProjectView) + Send + Sync>;

/// An event together with the project snapshot and emission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// What happened.
    pub event: ManagerEvent,
    /// Project state at emission time.
    pub project: ProjectView,
    /// Milliseconds since the Unix epoch.
    pub at_ms: u128,
}

/// Statistics about scheduler throughput.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerStats {
    /// Projects accepted by `submit`.
    pub submitted: u64,
    /// Projects the worker picked up.
    pub started: u64,
    /// Projects that ended `Completed`.
    pub completed: u64,
    /// Projects that ended `Failed`.
    pub failed: u64,
    /// Projects waiting in the queue.
    pub queued: usize,
}

/// Internal counters (lock-free atomics).
#[derive(Debug, Default)]
struct ManagerCounters {
    submitted: AtomicU64,
    started: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

/// Queue plus stop flag, guarded together so the worker's wait predicate is consistent.
struct QueueState {
    queue: InMemoryQueue,
    stop: bool,
}

struct Shared {
    state: Mutex<QueueState>,
    wake: Condvar,
    listeners: RwLock<Vec<Listener>>,
    counters: ManagerCounters,
}

impl Shared {
    fn notify(&self, event: ManagerEvent, view: &ProjectView) {
        let listeners: Vec<Listener> = self.listeners.read().clone();
        for listener in &listeners {
            listener(event, view);
        }
    }
}

/// Priority-ordered, single-worker project scheduler.
pub struct ProjectManager {
    config: SchedulerConfig,
    shared: Arc<Shared>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl ProjectManager {
    /// Start a manager and its worker thread.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidConfig` if the configuration is invalid
    /// - `SchedulerError::WorkerSpawn` if the worker thread cannot be created
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::start(config, Vec::new())
    }

    /// Start with listeners already registered, so none of them can miss an event.
    pub(crate) fn start(
        config: SchedulerConfig,
        listeners: Vec<Listener>,
    ) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;

        let queue = config
            .max_queue_depth
            .map_or_else(InMemoryQueue::new, InMemoryQueue::with_max_depth);
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState { queue, stop: false }),
            wake: Condvar::new(),
            listeners: RwLock::new(listeners),
            counters: ManagerCounters::default(),
        });

        let worker_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(config.worker_name.clone())
            .stack_size(config.thread_stack_size)
            .spawn(move || worker_loop(&worker_shared))
            .map_err(|e| SchedulerError::WorkerSpawn(e.to_string()))?;
        let worker_id = handle.thread().id();

        info!(
            worker = %config.worker_name,
            max_queue_depth = ?config.max_queue_depth,
            "ProjectManager started"
        );

        Ok(Self {
            config,
            shared,
            worker: Mutex::new(Some(handle)),
            worker_id,
        })
    }

    /// Queue a project. Safe to call from any number of threads.
    ///
    /// Emits `Enqueued` on the calling thread, then wakes the worker.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::Shutdown` once shutdown has been requested
    /// - `SchedulerError::QueueFull` if a depth bound is configured and reached
    pub fn submit(&self, project: Project) -> Result<(), SchedulerError> {
        let view = project.view();
        {
            let mut state = self.shared.state.lock();
            if state.stop {
                warn!(project = %view.name, "submission rejected: manager shut down");
                return Err(SchedulerError::Shutdown);
            }
            if let Err(err) = state.queue.push(project) {
                warn!(project = %view.name, error = %err, "submission rejected");
                return Err(err);
            }
        }

        self.shared.counters.submitted.fetch_add(1, Ordering::Relaxed);
        debug!(project = %view.name, priority = view.priority, "project enqueued");
        self.shared.notify(ManagerEvent::Enqueued, &view);
        self.shared.wake.notify_one();
        Ok(())
    }

    /// Register a callback for every subsequent event, in registration order.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(ManagerEvent, &ProjectView) + Send + Sync + 'static,
    {
        self.shared.listeners.write().push(Arc::new(listener));
    }

    /// Receive every subsequent event on a channel.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<EventRecord> {
        let (tx, rx) = unbounded();
        self.add_listener(move |event, view| {
            // A dropped receiver just stops listening.
            let _ = tx.send(EventRecord {
                event,
                project: view.clone(),
                at_ms: now_ms(),
            });
        });
        rx
    }

    /// Current counters and queue depth.
    #[must_use]
    pub fn stats(&self) -> ManagerStats {
        let counters = &self.shared.counters;
        ManagerStats {
            submitted: counters.submitted.load(Ordering::Relaxed),
            started: counters.started.load(Ordering::Relaxed),
            completed: counters.completed.load(Ordering::Relaxed),
            failed: counters.failed.load(Ordering::Relaxed),
            queued: self.shared.state.lock().queue.len(),
        }
    }

    /// Configuration the manager was started with.
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shared.state.lock().stop
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Idempotent. Returns the number of queued projects discarded by this
    /// call; no events are emitted for them. When called from a listener
    /// running on the worker thread the join is skipped and the worker exits
    /// after the current event.
    pub fn shutdown(&self) -> usize {
        let discarded = {
            let mut state = self.shared.state.lock();
            state.stop = true;
            state.queue.clear()
        };
        self.shared.wake.notify_all();

        if discarded > 0 {
            warn!(discarded, "discarding queued projects at shutdown");
        }

        if thread::current().id() == self.worker_id {
            return discarded;
        }

        // Held across the join so a concurrent caller waits for the same exit.
        let mut worker = self.worker.lock();
        if let Some(handle) = worker.take() {
            info!("Shutting down project manager");
            if handle.join().is_err() {
                warn!("worker thread panicked");
            } else {
                debug!("worker joined");
            }
        }
        discarded
    }
}

impl Drop for ProjectManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for ProjectManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectManager")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

fn worker_loop(shared: &Shared) {
    debug!("worker started");
    loop {
        let next = {
            let mut state = shared.state.lock();
            while !state.stop && state.queue.is_empty() {
                shared.wake.wait(&mut state);
            }
            if state.stop {
                break;
            }
            state.queue.pop()
        };
        let Some(mut project) = next else {
            continue;
        };

        shared.counters.started.fetch_add(1, Ordering::Relaxed);
        shared.notify(ManagerEvent::Started, &project.view());

        let status = project.execute();
        debug_assert!(status.is_terminal());

        let event = if status == ProjectStatus::Completed {
            shared.counters.completed.fetch_add(1, Ordering::Relaxed);
            ManagerEvent::Completed
        } else {
            shared.counters.failed.fetch_add(1, Ordering::Relaxed);
            ManagerEvent::Failed
        };
        shared.notify(event, &project.view());
    }
    debug!("worker exiting");
}

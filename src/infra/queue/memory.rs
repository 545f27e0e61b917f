//! In-memory project queue ordered by priority, FIFO among equal priorities.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::{Project, SchedulerError};

/// Wrapper to make a project orderable by priority (highest first) and by
/// submission sequence within a priority.
struct QueuedProject {
    seq: u64,
    project: Project,
}

impl PartialEq for QueuedProject {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for QueuedProject {}

impl PartialOrd for QueuedProject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedProject {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher priority first
        match self.project.priority().cmp(&other.project.priority()) {
            // FIFO within same priority: lower sequence wins (reversed for max-heap)
            Ordering::Equal => other.seq.cmp(&self.seq),
            other => other,
        }
    }
}

/// Priority heap of pending projects.
///
/// Every push is stamped with a monotonically increasing sequence number so
/// equal priorities come out in submission order.
pub struct InMemoryQueue {
    max_depth: Option<usize>,
    next_seq: u64,
    projects: BinaryHeap<QueuedProject>,
}

impl InMemoryQueue {
    /// Create an unbounded queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: None,
            next_seq: 0,
            projects: BinaryHeap::new(),
        }
    }

    /// Create a queue that rejects pushes beyond `max_depth` entries.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            next_seq: 0,
            projects: BinaryHeap::with_capacity(max_depth.min(1024)),
        }
    }

    /// Add a project.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::QueueFull`] when the depth bound is reached.
    pub fn push(&mut self, project: Project) -> Result<(), SchedulerError> {
        if let Some(max) = self.max_depth {
            if self.projects.len() >= max {
                return Err(SchedulerError::QueueFull(format!(
                    "max queue depth {max} reached"
                )));
            }
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.projects.push(QueuedProject { seq, project });
        Ok(())
    }

    /// Remove the highest-priority, earliest-submitted project.
    pub fn pop(&mut self) -> Option<Project> {
        self.projects.pop().map(|queued| queued.project)
    }

    /// Drop every pending project and return how many there were.
    pub fn clear(&mut self) -> usize {
        let discarded = self.projects.len();
        self.projects.clear();
        discarded
    }

    /// Maximum depth, if bounded.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Current depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

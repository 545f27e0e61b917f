//! Audit sink implementations.
//!
//! An audit sink keeps a record of manager events. [`audit_listener`] turns a
//! shared sink into a listener that can be registered on a manager.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::core::{ManagerEvent, ProjectStatus, ProjectView};
use crate::util::clock::now_ms;

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Event identifier.
    pub event_id: Uuid,
    /// Related project identifier.
    pub project_id: Uuid,
    /// Project name.
    pub project: String,
    /// Action taken.
    pub action: ManagerEvent,
    /// Project status when the event fired.
    pub status: ProjectStatus,
    /// Project priority.
    pub priority: i32,
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AuditEvent);
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AuditEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AuditEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Helper to build an audit event from a manager notification.
#[must_use]
pub fn build_audit_event(action: ManagerEvent, view: &ProjectView) -> AuditEvent {
    AuditEvent {
        event_id: Uuid::new_v4(),
        project_id: view.id,
        project: view.name.clone(),
        action,
        status: view.status,
        priority: view.priority,
        created_at_ms: now_ms(),
    }
}

/// Wrap a shared sink as a manager listener.
pub fn audit_listener<S>(sink: Arc<Mutex<S>>) -> impl Fn(ManagerEvent, &ProjectView) + Send + Sync
where
    S: AuditSink + 'static,
{
    move |event, view| sink.lock().record(build_audit_event(event, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Project;

    #[test]
    fn test_in_memory_audit_sink() {
        let mut sink = InMemoryAuditSink::new(10);
        let view = Project::new("Project-01", None, 1).view();

        sink.record(build_audit_event(ManagerEvent::Enqueued, &view));
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].project, "Project-01");
        assert_eq!(events[0].project_id, view.id);
        assert_eq!(events[0].action, ManagerEvent::Enqueued);
        assert_eq!(events[0].status, ProjectStatus::InQueue);
    }

    #[test]
    fn test_audit_sink_overflow() {
        let mut sink = InMemoryAuditSink::new(2);
        for name in ["a", "b", "c"] {
            let view = Project::new(name, None, 0).view();
            sink.record(build_audit_event(ManagerEvent::Enqueued, &view));
        }

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].project, "b"); // First one popped
        assert_eq!(events[1].project, "c");
    }

    #[test]
    fn test_audit_listener_records() {
        let sink = Arc::new(Mutex::new(InMemoryAuditSink::new(4)));
        let listener = audit_listener(Arc::clone(&sink));
        let view = Project::new("Project-02", None, 5).view();

        listener(ManagerEvent::Started, &view);
        assert_eq!(sink.lock().events()[0].action, ManagerEvent::Started);
    }
}

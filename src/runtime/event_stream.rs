//! Forward manager events into a tokio channel.
//!
//! Listeners run on the scheduler's own threads, so the sender side never
//! needs a runtime; only the receiving side is async.

use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use uuid::Uuid;

use crate::core::{EventRecord, ManagerEvent, ProjectManager};
use crate::util::now_ms;

/// Register a listener that forwards every subsequent event to the returned receiver.
pub fn event_stream(manager: &ProjectManager) -> UnboundedReceiver<EventRecord> {
    let (tx, rx) = unbounded_channel();
    manager.add_listener(move |event, view| {
        let _ = tx.send(EventRecord {
            event,
            project: view.clone(),
            at_ms: now_ms(),
        });
    });
    rx
}

/// Await the `Completed` or `Failed` event of `project_id`.
///
/// Other events are skipped. Returns `None` on timeout or when the stream closes.
pub async fn wait_for_outcome(
    events: &mut UnboundedReceiver<EventRecord>,
    project_id: Uuid,
    timeout: Duration,
) -> Option<EventRecord> {
    let wait = async {
        while let Some(record) = events.recv().await {
            let terminal = matches!(record.event, ManagerEvent::Completed | ManagerEvent::Failed);
            if terminal && record.project.id == project_id {
                return Some(record);
            }
        }
        None
    };
    tokio::time::timeout(timeout, wait).await.ok().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use crate::core::{Project, ProjectStatus};

    #[tokio::test]
    async fn test_outcome_arrives_on_stream() {
        let manager = ProjectManager::new(SchedulerConfig::default()).unwrap();
        let mut events = event_stream(&manager);

        let project = Project::new("orphan", None, 3);
        let id = project.id();
        manager.submit(project).unwrap();

        let record = wait_for_outcome(&mut events, id, Duration::from_secs(5))
            .await
            .expect("outcome within timeout");
        assert_eq!(record.event, ManagerEvent::Failed);
        assert_eq!(record.project.status, ProjectStatus::Failed);
    }
}

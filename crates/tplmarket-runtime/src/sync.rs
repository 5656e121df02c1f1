use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::JoinHandle;
use std::time::Duration;

use tplmarket_store::{RemoteStore, UserRecord};
use tplmarket_types::SavedSet;

/// One remote reconciliation unit: the full saved-set snapshot plus the
/// affected template's already-adjusted count. Snapshots from concurrent
/// toggles may land out of order; last write wins at the store.
#[derive(Debug, Clone)]
pub struct SyncTask {
    pub user_id: String,
    pub saved: SavedSet,
    pub template_id: String,
    pub saved_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Synced { template_id: String },
    Failed { template_id: String, message: String },
}

/// Background best-effort persistence of toggle results.
///
/// Runs on its own thread fed by a channel. Outcomes are reported as events,
/// never applied to controller state directly: once the liveness flag drops
/// (controller shut down or dropped mid-flight), finished work is discarded
/// instead of delivered.
pub struct SyncWorker {
    tx: Option<Sender<SyncTask>>,
    events: Receiver<SyncEvent>,
    alive: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SyncWorker {
    pub fn spawn(store: Arc<dyn RemoteStore>) -> Self {
        let (tx, rx) = channel::<SyncTask>();
        let (events_tx, events_rx) = channel();
        let alive = Arc::new(AtomicBool::new(true));

        let thread_alive = alive.clone();
        let handle = std::thread::spawn(move || {
            while let Ok(task) = rx.recv() {
                let result = run_task(store.as_ref(), &task);

                // Discard results that complete after shutdown.
                if !thread_alive.load(Ordering::SeqCst) {
                    break;
                }

                let event = match result {
                    Ok(()) => SyncEvent::Synced {
                        template_id: task.template_id,
                    },
                    Err(err) => SyncEvent::Failed {
                        template_id: task.template_id,
                        message: err.to_string(),
                    },
                };

                if events_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self {
            tx: Some(tx),
            events: events_rx,
            alive,
            handle: Some(handle),
        }
    }

    /// Queues a task; returns whether the worker accepted it.
    pub fn dispatch(&self, task: SyncTask) -> bool {
        match &self.tx {
            Some(tx) => tx.send(task).is_ok(),
            None => false,
        }
    }

    /// Non-blocking drain of completed outcomes.
    pub fn drain_events(&self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Blocks until the next outcome arrives or `timeout` elapses.
    pub fn next_event(&self, timeout: Duration) -> Option<SyncEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Stops accepting work and discards anything still in flight.
    pub fn shutdown(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// User row first, then the template count, matching the write order the
/// store always saw. No transaction spans the two; a failure in between
/// leaves accepted drift.
fn run_task(store: &dyn RemoteStore, task: &SyncTask) -> tplmarket_store::Result<()> {
    store.upsert_user(&UserRecord {
        id: task.user_id.clone(),
        saved_templates: task.saved.clone(),
    })?;
    store.set_template_saved_count(&task.template_id, task.saved_count)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tplmarket_testing::{MemoryStore, fixtures};

    fn task(count: u32) -> SyncTask {
        SyncTask {
            user_id: "u1".to_string(),
            saved: SavedSet::from_ids(["t1"]),
            template_id: "t1".to_string(),
            saved_count: count,
        }
    }

    #[test]
    fn successful_task_writes_both_rows() {
        let store = Arc::new(MemoryStore::with_templates(vec![fixtures::template("t1")]));
        let worker = SyncWorker::spawn(store.clone());

        assert!(worker.dispatch(task(1)));
        assert_eq!(
            worker.next_event(Duration::from_secs(2)),
            Some(SyncEvent::Synced {
                template_id: "t1".to_string()
            })
        );

        let user = store.get_user("u1").unwrap().unwrap();
        assert_eq!(user.saved_templates.ids(), ["t1"]);
        assert_eq!(store.get_template("t1").unwrap().unwrap().saved_count, 1);
    }

    #[test]
    fn failed_task_reports_without_panicking() {
        let store = Arc::new(MemoryStore::with_templates(vec![fixtures::template("t1")]));
        store.set_fail_writes(true);
        let worker = SyncWorker::spawn(store.clone());

        worker.dispatch(task(1));
        match worker.next_event(Duration::from_secs(2)) {
            Some(SyncEvent::Failed { template_id, .. }) => assert_eq!(template_id, "t1"),
            other => panic!("expected failure event, got {:?}", other),
        }
    }

    #[test]
    fn dispatch_after_shutdown_is_refused() {
        let store = Arc::new(MemoryStore::new());
        let mut worker = SyncWorker::spawn(store);
        worker.shutdown();

        assert!(!worker.dispatch(task(1)));
        assert!(worker.drain_events().is_empty());
    }
}

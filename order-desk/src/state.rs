//! Shared desk state
//!
//! Holds the current order snapshot, the alert controller and the event
//! channel. Cheap to clone; all clones share the same state.

use crate::alert::{AlarmState, AlarmTransition, AlertController, AlertError};
use crate::event::DeskEvent;
use parking_lot::RwLock;
use shared::OrderSnapshot;
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 256;

struct Inner {
    snapshot: RwLock<Arc<OrderSnapshot>>,
    alarm: Mutex<AlertController>,
    events: broadcast::Sender<DeskEvent>,
}

#[derive(Clone)]
pub struct DeskState {
    inner: Arc<Inner>,
}

impl DeskState {
    pub fn new(alarm: AlertController) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                snapshot: RwLock::new(Arc::new(OrderSnapshot::empty())),
                alarm: Mutex::new(alarm),
                events,
            }),
        }
    }

    // ========== Snapshot ==========

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<OrderSnapshot> {
        self.inner.snapshot.read().clone()
    }

    /// Replace the snapshot wholesale
    pub fn replace_snapshot(&self, snapshot: OrderSnapshot) -> Arc<OrderSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.inner.snapshot.write() = snapshot.clone();
        snapshot
    }

    /// Derive a new snapshot from the current one and install it
    pub fn update_snapshot(
        &self,
        f: impl FnOnce(&OrderSnapshot) -> OrderSnapshot,
    ) -> Arc<OrderSnapshot> {
        let mut guard = self.inner.snapshot.write();
        let updated = Arc::new(f(&guard));
        *guard = updated.clone();
        updated
    }

    // ========== Events ==========

    pub fn subscribe(&self) -> broadcast::Receiver<DeskEvent> {
        self.inner.events.subscribe()
    }

    /// Publish an event; having no subscribers is not an error
    pub fn publish(&self, event: DeskEvent) {
        let _ = self.inner.events.send(event);
    }

    // ========== Alarm ==========

    pub async fn alarm_state(&self) -> AlarmState {
        self.inner.alarm.lock().await.state()
    }

    /// Start the alarm, reporting degraded alerting to the UI
    pub async fn start_alarm(&self) -> Result<AlarmTransition, AlertError> {
        let result = self.inner.alarm.lock().await.start().await;
        match &result {
            Ok(AlarmTransition::Started) => self.publish(DeskEvent::AlarmStarted),
            Ok(_) => {}
            Err(e) => self.publish(DeskEvent::AlertDegraded {
                reason: e.to_string(),
            }),
        }
        result
    }

    pub async fn stop_alarm(&self) -> AlarmTransition {
        let transition = self.inner.alarm.lock().await.stop();
        if transition == AlarmTransition::Stopped {
            self.publish(DeskEvent::AlarmStopped);
        }
        transition
    }

    /// Non-blocking stop for teardown paths that cannot await.
    ///
    /// Returns `false` if the controller is busy; it is then released when
    /// the last state handle drops it.
    pub fn try_stop_alarm(&self) -> bool {
        match self.inner.alarm.try_lock() {
            Ok(mut alarm) => {
                if alarm.stop() == AlarmTransition::Stopped {
                    self.publish(DeskEvent::AlarmStopped);
                }
                true
            }
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for DeskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskState")
            .field("orders", &self.snapshot().len())
            .field("subscribers", &self.inner.events.receiver_count())
            .finish()
    }
}

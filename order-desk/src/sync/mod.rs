//! Order synchronization loop
//!
//! # Cycle
//!
//! ```text
//! run_cycle()
//!     ├─ 1. Overlap guard (skip if a cycle is in flight)
//!     ├─ 2. Fetch assigned orders (raced against cancellation)
//!     ├─ 3. Failure → SyncFailed / ReauthRequired, nothing else changes
//!     ├─ 4. Sort newest-first into a snapshot
//!     ├─ 5. Evaluate AlarmDecision against the seen-set
//!     ├─ 6. start() on a new qualifying order, then stop() if none remain
//!     ├─ 7. Replace snapshot and seen-set
//!     └─ 8. Publish SnapshotUpdated
//! ```
//!
//! The periodic task ticks on a fixed interval; missed ticks are skipped,
//! never queued. Cancelling the loop stops the alarm and discards any
//! fetch result that arrives afterwards.

mod diff;

pub use diff::AlarmDecision;

use crate::event::DeskEvent;
use crate::state::DeskState;
use futures::FutureExt;
use parking_lot::Mutex;
use shared::OrderSnapshot;
use shop_client::{ClientError, OrderSource};
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// How long teardown waits for the loop task before aborting it
const SHUTDOWN_TIMEOUT_SECS: u64 = 3;

/// Result of one sync cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Snapshot replaced
    Applied {
        orders: usize,
        decision: AlarmDecision,
    },
    /// Transient failure; previous snapshot kept
    Failed(ClientError),
    /// Credentials rejected; polling must stop
    ReauthRequired,
    /// Another cycle was still in flight
    Skipped,
    /// Loop cancelled before the result could be applied
    Cancelled,
}

/// Resets the in-flight flag when the cycle ends, including on cancellation
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SyncEngine {
    source: Arc<dyn OrderSource>,
    state: DeskState,
    /// IDs of every order in the last applied snapshot
    seen: Mutex<HashSet<String>>,
    in_flight: AtomicBool,
    shutdown: CancellationToken,
}

impl SyncEngine {
    pub fn new(source: Arc<dyn OrderSource>, state: DeskState) -> Self {
        Self {
            source,
            state,
            seen: Mutex::new(HashSet::new()),
            in_flight: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn seen_ids(&self) -> HashSet<String> {
        self.seen.lock().clone()
    }

    /// Stop polling. The running loop exits before its next tick.
    pub fn cancel(&self) {
        self.shutdown.cancel();
    }

    /// Run one sync cycle
    pub async fn run_cycle(&self) -> CycleOutcome {
        if self.shutdown.is_cancelled() {
            return CycleOutcome::Cancelled;
        }
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Sync cycle still in flight, skipping");
            return CycleOutcome::Skipped;
        };

        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return CycleOutcome::Cancelled,
            result = self.source.fetch_assigned_orders() => result,
        };
        if self.shutdown.is_cancelled() {
            tracing::debug!("Discarding fetch result after cancellation");
            return CycleOutcome::Cancelled;
        }

        let orders = match result {
            Ok(orders) => orders,
            Err(e) if e.is_auth() => {
                tracing::warn!(error = %e, "Order sync requires reauthentication");
                self.state.publish(DeskEvent::ReauthRequired {
                    message: e.to_string(),
                });
                return CycleOutcome::ReauthRequired;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch orders");
                self.state.publish(DeskEvent::SyncFailed {
                    message: e.to_string(),
                });
                return CycleOutcome::Failed(e);
            }
        };

        let snapshot = OrderSnapshot::from_server(orders);
        let decision = AlarmDecision::evaluate(&snapshot, &self.seen.lock());

        if decision.should_start() {
            // Denial is reported by the state as AlertDegraded
            let _ = self.state.start_alarm().await;
        }
        if decision.should_stop() {
            self.state.stop_alarm().await;
        }

        let orders = snapshot.len();
        *self.seen.lock() = snapshot.ids();
        let snapshot = self.state.replace_snapshot(snapshot);
        self.state.publish(DeskEvent::SnapshotUpdated(snapshot));

        tracing::debug!(
            orders,
            has_qualifying = decision.has_qualifying,
            new_qualifying = decision.is_new_qualifying,
            "Order snapshot applied"
        );
        CycleOutcome::Applied { orders, decision }
    }

    /// Periodic loop; first cycle runs immediately
    pub async fn run(self: Arc<Self>, period: Duration) {
        tracing::info!(period_secs = period.as_secs_f64(), "Order sync loop started");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            if self.run_cycle().await == CycleOutcome::ReauthRequired {
                self.shutdown.cancel();
                break;
            }
        }

        self.state.stop_alarm().await;
        tracing::info!("Order sync loop stopped");
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("source", &"<OrderSource>")
            .field("in_flight", &self.is_in_flight())
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Running sync loop.
///
/// `shutdown()` is the orderly teardown: it cancels the loop, waits for
/// the task and stops the alarm. Dropping the handle cancels and aborts.
pub struct SyncHandle {
    engine: Arc<SyncEngine>,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Spawn the periodic loop for `engine`
    pub fn spawn(engine: Arc<SyncEngine>, period: Duration) -> Self {
        let state = engine.state.clone();
        let run = engine.clone().run(period);
        let task = tokio::spawn(async move {
            if let Err(panic_info) = AssertUnwindSafe(run).catch_unwind().await {
                let panic_msg: String = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                tracing::error!(panic = %panic_msg, "Order sync loop panicked");
                state.stop_alarm().await;
            }
        });

        Self {
            engine,
            task: Some(task),
        }
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    /// Run a cycle now (manual refresh); obeys the overlap guard
    pub async fn sync_now(&self) -> CycleOutcome {
        self.engine.run_cycle().await
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Resolves once the loop has been cancelled (teardown or reauth)
    pub async fn stopped(&self) {
        self.engine.shutdown.cancelled().await
    }

    /// Cancel the loop, wait for it and release the alarm
    pub async fn shutdown(mut self) {
        self.engine.cancel();

        if let Some(mut task) = self.task.take() {
            let timeout = Duration::from_secs(SHUTDOWN_TIMEOUT_SECS);
            match tokio::time::timeout(timeout, &mut task).await {
                Ok(Ok(())) => tracing::debug!("Sync task completed gracefully"),
                Ok(Err(e)) if e.is_cancelled() => tracing::debug!("Sync task cancelled"),
                Ok(Err(e)) => tracing::error!("Sync task failed: {}", e),
                Err(_) => {
                    tracing::warn!(
                        "Sync task shutdown timed out ({}s), aborting",
                        SHUTDOWN_TIMEOUT_SECS
                    );
                    task.abort();
                    let _ = task.await;
                }
            }
        }

        self.engine.state.stop_alarm().await;
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.engine.cancel();
            task.abort();
            self.engine.state.try_stop_alarm();
        }
    }
}

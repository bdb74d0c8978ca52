//! Events published to the UI layer

use shared::OrderSnapshot;
use std::sync::Arc;

/// Desk event, broadcast to every subscriber
#[derive(Debug, Clone)]
pub enum DeskEvent {
    /// A new snapshot replaced the previous one (sync or optimistic update)
    SnapshotUpdated(Arc<OrderSnapshot>),
    /// A sync cycle failed; the previous snapshot is still shown
    SyncFailed { message: String },
    /// Credentials are missing or expired; polling has stopped
    ReauthRequired { message: String },
    AlarmStarted,
    AlarmStopped,
    /// The alarm could not sound; show a visual indicator instead
    AlertDegraded { reason: String },
    /// A workflow command was rejected; the snapshot is unchanged
    CommandFailed { order_id: String, message: String },
}

//! Platform seam for the alarm's sound and vibration

use super::AlertError;
use async_trait::async_trait;
use std::time::Duration;

/// Vibration pattern: buzz 1s, pause 0.5s, buzz 1s, pause 0.5s (repeated)
pub const VIBRATION_PATTERN: [Duration; 4] = [
    Duration::from_millis(1000),
    Duration::from_millis(500),
    Duration::from_millis(1000),
    Duration::from_millis(500),
];

/// Sound and haptic resources used by the new-order alarm.
///
/// Only the [`AlertController`](super::AlertController) calls into a
/// backend, and it guarantees that every engaged resource is released
/// exactly once.
#[async_trait]
pub trait AlarmBackend: Send + Sync {
    /// Ask the platform for permission to vibrate
    async fn request_vibration_permission(&self) -> bool;

    /// Load the alarm sound and play it in an endless loop
    fn play_looping(&self) -> Result<(), AlertError>;

    /// Stop and release the looping sound
    fn stop_sound(&self);

    /// Start vibrating with the given on/off pattern
    fn vibrate(&self, pattern: &[Duration], repeat: bool);

    /// Cancel any running vibration
    fn cancel_vibration(&self);
}

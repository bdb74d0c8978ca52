//! New-order alarm
//!
//! # State machine
//!
//! ```text
//!            start() [permission granted]
//!   Idle ─────────────────────────────────▶ Sounding
//!    ▲                                         │
//!    └──────────────── stop() ─────────────────┘
//! ```
//!
//! `start()` while sounding and `stop()` while idle are no-ops, so at most
//! one sound instance is ever active. A denied vibration permission leaves
//! the controller idle and is reported as [`AlertError::PermissionDenied`];
//! a sound that fails to load degrades the alarm to vibration only.

mod backend;
mod terminal;

pub use backend::{AlarmBackend, VIBRATION_PATTERN};
pub use terminal::TerminalAlarm;

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Alert error type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlertError {
    /// The platform refused the permission the alarm needs
    #[error("Alert permission denied")]
    PermissionDenied,

    /// The alarm sound could not be loaded or played
    #[error("Alarm playback failed: {0}")]
    Playback(String),
}

/// Alarm state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Idle,
    Sounding,
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlarmState::Idle => write!(f, "Idle"),
            AlarmState::Sounding => write!(f, "Sounding"),
        }
    }
}

/// Result of a start/stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmTransition {
    Started,
    Stopped,
    /// Already in the requested state
    Unchanged,
}

/// Resources held while sounding
#[derive(Debug, Clone, Copy)]
struct Engaged {
    sound: bool,
    vibration: bool,
}

/// Owner of the alarm's sound and vibration resources
pub struct AlertController {
    backend: Arc<dyn AlarmBackend>,
    engaged: Option<Engaged>,
}

impl AlertController {
    pub fn new(backend: Arc<dyn AlarmBackend>) -> Self {
        Self {
            backend,
            engaged: None,
        }
    }

    pub fn state(&self) -> AlarmState {
        if self.engaged.is_some() {
            AlarmState::Sounding
        } else {
            AlarmState::Idle
        }
    }

    /// Whether the looping sound is part of the current alarm
    pub fn is_sound_engaged(&self) -> bool {
        self.engaged.is_some_and(|e| e.sound)
    }

    /// Start sounding. No-op when already sounding.
    pub async fn start(&mut self) -> Result<AlarmTransition, AlertError> {
        if self.engaged.is_some() {
            return Ok(AlarmTransition::Unchanged);
        }

        if !self.backend.request_vibration_permission().await {
            tracing::warn!("Vibration permission denied, new-order alarm not engaged");
            return Err(AlertError::PermissionDenied);
        }

        let sound = match self.backend.play_looping() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Alarm sound unavailable, vibrating only");
                false
            }
        };
        self.backend.vibrate(&VIBRATION_PATTERN, true);

        self.engaged = Some(Engaged {
            sound,
            vibration: true,
        });
        tracing::info!(sound, "New-order alarm sounding");
        Ok(AlarmTransition::Started)
    }

    /// Stop sounding and release resources. No-op when idle.
    pub fn stop(&mut self) -> AlarmTransition {
        match self.engaged.take() {
            Some(engaged) => {
                self.release(engaged);
                tracing::info!("New-order alarm stopped");
                AlarmTransition::Stopped
            }
            None => AlarmTransition::Unchanged,
        }
    }

    fn release(&self, engaged: Engaged) {
        if engaged.sound {
            self.backend.stop_sound();
        }
        if engaged.vibration {
            self.backend.cancel_vibration();
        }
    }
}

impl Drop for AlertController {
    fn drop(&mut self) {
        if let Some(engaged) = self.engaged.take() {
            tracing::debug!("Releasing alarm resources on drop");
            self.release(engaged);
        }
    }
}

impl fmt::Debug for AlertController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertController")
            .field("backend", &"<AlarmBackend>")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        deny_permission: bool,
        broken_sound: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().clone()
        }

        fn count(&self, call: &str) -> usize {
            self.calls.lock().iter().filter(|c| **c == call).count()
        }
    }

    #[async_trait]
    impl AlarmBackend for Recorder {
        async fn request_vibration_permission(&self) -> bool {
            self.calls.lock().push("permission");
            !self.deny_permission
        }

        fn play_looping(&self) -> Result<(), AlertError> {
            if self.broken_sound {
                return Err(AlertError::Playback("alarm.mp3 missing".into()));
            }
            self.calls.lock().push("play");
            Ok(())
        }

        fn stop_sound(&self) {
            self.calls.lock().push("stop_sound");
        }

        fn vibrate(&self, pattern: &[Duration], repeat: bool) {
            assert_eq!(pattern, &VIBRATION_PATTERN);
            assert!(repeat);
            self.calls.lock().push("vibrate");
        }

        fn cancel_vibration(&self) {
            self.calls.lock().push("cancel_vibration");
        }
    }

    #[tokio::test]
    async fn test_start_engages_sound_and_vibration() {
        let backend = Arc::new(Recorder::default());
        let mut alarm = AlertController::new(backend.clone());

        assert_eq!(alarm.start().await, Ok(AlarmTransition::Started));
        assert_eq!(alarm.state(), AlarmState::Sounding);
        assert!(alarm.is_sound_engaged());
        assert_eq!(backend.calls(), vec!["permission", "play", "vibrate"]);
    }

    #[tokio::test]
    async fn test_double_start_plays_once() {
        let backend = Arc::new(Recorder::default());
        let mut alarm = AlertController::new(backend.clone());

        alarm.start().await.unwrap();
        assert_eq!(alarm.start().await, Ok(AlarmTransition::Unchanged));

        assert_eq!(alarm.state(), AlarmState::Sounding);
        assert_eq!(backend.count("play"), 1);
        assert_eq!(backend.count("vibrate"), 1);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let backend = Arc::new(Recorder::default());
        let mut alarm = AlertController::new(backend.clone());

        assert_eq!(alarm.stop(), AlarmTransition::Unchanged);
        alarm.start().await.unwrap();
        assert_eq!(alarm.stop(), AlarmTransition::Stopped);
        assert_eq!(alarm.stop(), AlarmTransition::Unchanged);

        assert_eq!(alarm.state(), AlarmState::Idle);
        assert_eq!(backend.count("stop_sound"), 1);
        assert_eq!(backend.count("cancel_vibration"), 1);
    }

    #[tokio::test]
    async fn test_permission_denied_stays_idle() {
        let backend = Arc::new(Recorder {
            deny_permission: true,
            ..Default::default()
        });
        let mut alarm = AlertController::new(backend.clone());

        assert_eq!(alarm.start().await, Err(AlertError::PermissionDenied));
        assert_eq!(alarm.state(), AlarmState::Idle);
        assert_eq!(backend.calls(), vec!["permission"]);
    }

    #[tokio::test]
    async fn test_broken_sound_degrades_to_vibration() {
        let backend = Arc::new(Recorder {
            broken_sound: true,
            ..Default::default()
        });
        let mut alarm = AlertController::new(backend.clone());

        assert_eq!(alarm.start().await, Ok(AlarmTransition::Started));
        assert_eq!(alarm.state(), AlarmState::Sounding);
        assert!(!alarm.is_sound_engaged());

        alarm.stop();
        // Only the vibration was engaged, so only the vibration is released
        assert_eq!(backend.count("stop_sound"), 0);
        assert_eq!(backend.count("cancel_vibration"), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_resources() {
        let backend = Arc::new(Recorder::default());
        {
            let mut alarm = AlertController::new(backend.clone());
            alarm.start().await.unwrap();
        }
        assert_eq!(backend.count("stop_sound"), 1);
        assert_eq!(backend.count("cancel_vibration"), 1);
    }
}

//! Console alarm backend
//!
//! Rings the terminal bell on a repeating task while sounding. Consoles
//! have no haptics, so vibration requests are only logged.

use super::{AlarmBackend, AlertError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default bell period
const RING_INTERVAL_MS: u64 = 1500;

pub struct TerminalAlarm {
    ring_interval: Duration,
    ringing: Mutex<Option<CancellationToken>>,
}

impl TerminalAlarm {
    pub fn new(ring_interval: Duration) -> Self {
        Self {
            ring_interval,
            ringing: Mutex::new(None),
        }
    }

    pub fn is_ringing(&self) -> bool {
        self.ringing.lock().is_some()
    }
}

impl Default for TerminalAlarm {
    fn default() -> Self {
        Self::new(Duration::from_millis(RING_INTERVAL_MS))
    }
}

fn ring_bell() {
    let mut err = std::io::stderr();
    let _ = err.write_all(b"\x07");
    let _ = err.flush();
}

#[async_trait]
impl AlarmBackend for TerminalAlarm {
    async fn request_vibration_permission(&self) -> bool {
        true
    }

    fn play_looping(&self) -> Result<(), AlertError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| AlertError::Playback(e.to_string()))?;

        let token = CancellationToken::new();
        let stop = token.clone();
        let period = self.ring_interval;
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = ticker.tick() => ring_bell(),
                }
            }
        });

        if let Some(previous) = self.ringing.lock().replace(token) {
            previous.cancel();
        }
        Ok(())
    }

    fn stop_sound(&self) {
        if let Some(token) = self.ringing.lock().take() {
            token.cancel();
        }
    }

    fn vibrate(&self, pattern: &[Duration], repeat: bool) {
        let pattern_ms: Vec<u128> = pattern.iter().map(Duration::as_millis).collect();
        tracing::debug!(?pattern_ms, repeat, "Vibration requested (no haptic device)");
    }

    fn cancel_vibration(&self) {}
}

impl Drop for TerminalAlarm {
    fn drop(&mut self) {
        self.stop_sound();
    }
}

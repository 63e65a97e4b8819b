//! Alert output services.
//!
//! The engine and the completion handler never touch the speaker or the
//! haptics hardware directly - they call through [`AlertService`]. The
//! terminal build renders sound as the ASCII bell and vibration as log
//! lines; tests inject recording fakes.

use std::io::Write;

use tracing::{debug, info};

use crate::timer::VibrationPattern;

/// Abstract audio/haptic surface for completion alerts.
///
/// Implementations must tolerate redundant calls: `stop_alert` and
/// `cancel_vibration` can arrive when nothing is playing.
pub trait AlertService: Send + Sync {
    /// Begin the looped completion sound.
    fn play_alert(&self);

    /// Stop the completion sound.
    fn stop_alert(&self);

    /// Start the repeating vibration cadence.
    fn vibrate(&self, pattern: &VibrationPattern);

    /// Cancel the vibration cadence.
    fn cancel_vibration(&self);
}

/// Terminal-backed alerts: bell character for sound, log lines for
/// vibration. Each channel can be switched off from settings.
#[derive(Debug, Clone)]
pub struct ConsoleAlerts {
    sound: bool,
    vibration: bool,
}

impl ConsoleAlerts {
    pub fn new(sound: bool, vibration: bool) -> Self {
        Self { sound, vibration }
    }
}

impl AlertService for ConsoleAlerts {
    fn play_alert(&self) {
        if !self.sound {
            return;
        }
        // The bell shares stderr with the logs; stdout is reserved for
        // countdown and JSON output.
        eprint!("\x07");
        let _ = std::io::stderr().flush();
        info!("alert ringing");
    }

    fn stop_alert(&self) {
        if self.sound {
            debug!("alert silenced");
        }
    }

    fn vibrate(&self, pattern: &VibrationPattern) {
        if self.vibration {
            info!(pattern_ms = ?pattern.0, "vibration started");
        }
    }

    fn cancel_vibration(&self) {
        if self.vibration {
            debug!("vibration cancelled");
        }
    }
}

/// No-op alert service for quiet runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlerts;

impl AlertService for SilentAlerts {
    fn play_alert(&self) {}
    fn stop_alert(&self) {}
    fn vibrate(&self, _pattern: &VibrationPattern) {}
    fn cancel_vibration(&self) {}
}

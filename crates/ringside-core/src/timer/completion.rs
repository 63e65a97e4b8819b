//! Completion alerting.
//!
//! When a run finishes, the alert must keep ringing until the user
//! explicitly acknowledges it - walking away from a finished timer is the
//! one thing this app is not allowed to let happen silently.
//!
//! Acknowledge and reset both funnel into one idempotent disarm, so
//! whichever arrives first silences the hardware and the other becomes a
//! no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::AlertService;
use crate::events::Event;

/// Vibration cadence in milliseconds, alternating buzz and pause. The
/// whole pattern repeats until cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibrationPattern(pub Vec<u64>);

impl Default for VibrationPattern {
    /// The stock completion buzz: two half-second pulses per cycle.
    fn default() -> Self {
        Self(vec![500, 500, 500, 500])
    }
}

/// Tracks the armed completion alert for one run.
#[derive(Debug, Clone)]
pub struct CompletionAlert {
    armed_at: Option<DateTime<Utc>>,
    pattern: VibrationPattern,
}

impl CompletionAlert {
    pub fn new(pattern: VibrationPattern) -> Self {
        Self {
            armed_at: None,
            pattern,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Fire the persistent alert: looped sound plus repeating vibration.
    /// No-op when already armed.
    pub fn arm(&mut self, service: &dyn AlertService) {
        if self.armed_at.is_some() {
            return;
        }
        service.play_alert();
        service.vibrate(&self.pattern);
        self.armed_at = Some(Utc::now());
    }

    /// User acknowledgment: silence the alert and report how long it rang.
    /// Returns `None` when nothing was armed.
    pub fn acknowledge(&mut self, service: &dyn AlertService) -> Option<Event> {
        let armed_at = self.disarm(service)?;
        let rang_ms = (Utc::now() - armed_at).num_milliseconds().max(0) as u64;
        Some(Event::AlertAcknowledged {
            rang_ms,
            at: Utc::now(),
        })
    }

    /// Silence without an event (the reset path). Safe to call when idle.
    pub fn cancel(&mut self, service: &dyn AlertService) {
        let _ = self.disarm(service);
    }

    /// Stops sound and vibration unconditionally, so a cancel racing an
    /// acknowledge can never leave the alert ringing.
    fn disarm(&mut self, service: &dyn AlertService) -> Option<DateTime<Utc>> {
        service.stop_alert();
        service.cancel_vibration();
        self.armed_at.take()
    }
}

impl Default for CompletionAlert {
    fn default() -> Self {
        Self::new(VibrationPattern::default())
    }
}

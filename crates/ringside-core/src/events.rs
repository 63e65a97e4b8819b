use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::TimerKind;

/// Every externally visible state change produces an Event.
/// The CLI renders them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        kind: TimerKind,
        total_rounds: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A new round began, either from the previous round directly or
    /// because a rest ended.
    RoundStarted {
        round: u32,
        total_rounds: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// A rest period began after the given round.
    RestStarted {
        after_round: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// The final segment finished. The completion alert rings from here
    /// until acknowledged.
    TimerCompleted {
        kind: TimerKind,
        total_rounds: u32,
        at: DateTime<Utc>,
    },
    /// The user silenced the completion alert.
    AlertAcknowledged {
        rang_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
}

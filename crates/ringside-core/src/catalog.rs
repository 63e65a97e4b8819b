//! Timer catalog.
//!
//! The catalog is the app's home screen: the list of timer kinds a user
//! can create, each carrying display metadata and the screen key used to
//! launch it.

use serde::{Deserialize, Serialize};

/// The kinds of timers offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Standard,
    Round,
    Interval,
}

impl TimerKind {
    /// Screen key used for navigation.
    pub fn screen(self) -> &'static str {
        match self {
            TimerKind::Standard => "StandardTimer",
            TimerKind::Round => "RoundTimer",
            TimerKind::Interval => "IntervalTimer",
        }
    }

    /// Resolve a screen key back to its timer kind.
    pub fn from_screen(screen: &str) -> Option<Self> {
        match screen {
            "StandardTimer" => Some(TimerKind::Standard),
            "RoundTimer" => Some(TimerKind::Round),
            "IntervalTimer" => Some(TimerKind::Interval),
            _ => None,
        }
    }
}

/// One row of the timer catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: TimerKind,
    pub name: &'static str,
    pub description: &'static str,
    /// Icon name, kept from the mobile design language.
    pub icon: &'static str,
    pub screen: &'static str,
}

/// The full catalog, in display order.
pub const CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        kind: TimerKind::Standard,
        name: "Standard",
        description: "Simple count up or count down timer",
        icon: "timer-outline",
        screen: "StandardTimer",
    },
    CatalogEntry {
        kind: TimerKind::Round,
        name: "Round",
        description: "The same round duration repeated multiple times",
        icon: "refresh-circle-outline",
        screen: "RoundTimer",
    },
    CatalogEntry {
        kind: TimerKind::Interval,
        name: "Interval",
        description: "Set of custom intervals repeated multiple times",
        icon: "time-outline",
        screen: "IntervalTimer",
    },
];

/// Catalog row for a timer kind.
pub fn entry(kind: TimerKind) -> &'static CatalogEntry {
    let index = match kind {
        TimerKind::Standard => 0,
        TimerKind::Round => 1,
        TimerKind::Interval => 2,
    };
    &CATALOG[index]
}

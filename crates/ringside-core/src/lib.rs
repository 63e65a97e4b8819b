//! # Ringside Core Library
//!
//! This library provides the core logic for the Ringside workout timers.
//! It implements a CLI-first philosophy where every operation is available
//! via a standalone binary, with any GUI shell being a thin layer over the
//! same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine; the caller delivers
//!   one `tick()` per elapsed second
//! - **Run Plans**: Standard, round, and interval configurations compile
//!   into one segment list so all timer kinds share a single machine
//! - **Clock Service**: A Tokio task that owns the engine and serializes
//!   commands against the 1-second tick
//! - **Alerts**: Injected audio/haptics services; the completion alert
//!   rings until it is explicitly acknowledged
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`RunPlan`]: Compiled segment list for one run
//! - [`TimerService`]: Async clock driver and command loop
//! - [`Settings`]: Alert preference management

pub mod timer;
pub mod service;
pub mod alerts;
pub mod catalog;
pub mod storage;
pub mod events;
pub mod error;

pub use timer::{
    parse_duration_secs, IntervalConfig, IntervalStep, Phase, RunPlan, TimerConfig, TimerEngine,
    TimerSnapshot, VibrationPattern,
};
pub use service::{Command, TimerHandle, TimerService};
pub use alerts::{AlertService, ConsoleAlerts, SilentAlerts};
pub use catalog::{CatalogEntry, TimerKind, CATALOG};
pub use storage::{AlertsConfig, Settings};
pub use events::Event;
pub use error::{ConfigError, CoreError, SettingsError};

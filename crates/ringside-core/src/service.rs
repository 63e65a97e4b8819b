//! Async clock driver for the timer engine.
//!
//! One Tokio task per run owns the engine, the completion alert, and the
//! injected alert service. Commands and the 1-second tick are multiplexed
//! through a single `select!`, so the engine has exactly one writer and a
//! pause can never race a tick.
//!
//! State flows out two ways: a `watch` channel always holding the latest
//! [`TimerSnapshot`], and a `broadcast` channel carrying discrete
//! [`Event`]s for subscribers that care about boundaries rather than
//! levels.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::alerts::AlertService;
use crate::events::Event;
use crate::timer::{CompletionAlert, RunPlan, TimerEngine, TimerSnapshot, VibrationPattern};

/// Control messages accepted by a running timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    /// Silence the completion alert.
    Acknowledge,
    /// Stop the service task.
    Quit,
}

/// Client half of a spawned timer service.
///
/// Dropping every handle closes the command channel, which stops the task
/// and cancels any ringing alert.
#[derive(Clone)]
pub struct TimerHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<TimerSnapshot>,
    events: broadcast::Sender<Event>,
}

impl TimerHandle {
    /// Send a command to the service. Returns false if the task is gone.
    pub async fn send(&self, command: Command) -> bool {
        self.commands.send(command).await.is_ok()
    }

    /// Latest published state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A fresh receiver for awaiting state changes.
    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// A fresh receiver for boundary events. Only events sent after the
    /// call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}

/// Clock driver that owns one engine for the duration of a run.
pub struct TimerService {
    engine: TimerEngine,
    alert: CompletionAlert,
    alerts: Arc<dyn AlertService>,
    tick_period: Duration,
}

impl TimerService {
    pub fn new(plan: RunPlan, alerts: Arc<dyn AlertService>) -> Self {
        Self {
            engine: TimerEngine::new(plan),
            alert: CompletionAlert::default(),
            alerts,
            tick_period: Duration::from_secs(1),
        }
    }

    /// Use a custom vibration cadence for the completion alert.
    pub fn with_pattern(mut self, pattern: VibrationPattern) -> Self {
        self.alert = CompletionAlert::new(pattern);
        self
    }

    /// Override the 1-second cadence. The engine semantics are per-tick,
    /// so a shorter period runs the same sequence faster.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Spawn the service task and return the control handle.
    pub fn spawn(self) -> TimerHandle {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(self.engine.snapshot());
        let (event_tx, _) = broadcast::channel(32);
        let handle = TimerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            events: event_tx.clone(),
        };
        tokio::spawn(self.run(command_rx, snapshot_tx, event_tx));
        handle
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        snapshots: watch::Sender<TimerSnapshot>,
        events: broadcast::Sender<Event>,
    ) {
        let mut ticker = time::interval(self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.engine.is_running() => {
                    if let Some(event) = self.engine.tick() {
                        self.on_boundary(&event);
                        let _ = events.send(event);
                    }
                    let _ = snapshots.send(self.engine.snapshot());
                }
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if command == Command::Quit {
                        break;
                    }
                    if let Some(event) = self.handle_command(command, &mut ticker) {
                        let _ = events.send(event);
                    }
                    let _ = snapshots.send(self.engine.snapshot());
                }
            }
        }

        // The task never outlives a ringing alert.
        self.alert.cancel(self.alerts.as_ref());
        debug!("timer service stopped");
    }

    fn handle_command(&mut self, command: Command, ticker: &mut Interval) -> Option<Event> {
        match command {
            Command::Start => {
                let event = self.engine.start()?;
                // The first full second starts now, not at some leftover
                // deadline from before the run.
                ticker.reset();
                info!(
                    kind = ?self.engine.plan().kind(),
                    total_rounds = self.engine.plan().total_rounds(),
                    "timer started"
                );
                Some(event)
            }
            Command::Pause => self.engine.pause(),
            Command::Resume => {
                let event = self.engine.resume()?;
                ticker.reset();
                Some(event)
            }
            Command::Reset => {
                let event = self.engine.reset();
                self.alert.cancel(self.alerts.as_ref());
                event
            }
            Command::Acknowledge => self.alert.acknowledge(self.alerts.as_ref()),
            // Quit never reaches here.
            Command::Quit => None,
        }
    }

    fn on_boundary(&mut self, event: &Event) {
        match event {
            Event::TimerCompleted { total_rounds, .. } => {
                info!(total_rounds, "sequence complete, alert armed");
                self.alert.arm(self.alerts.as_ref());
            }
            Event::RoundStarted { round, total_rounds, .. } => {
                debug!(round, total_rounds, "round started");
            }
            Event::RestStarted { after_round, .. } => {
                debug!(after_round, "rest started");
            }
            _ => {}
        }
    }
}

//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads or read the wall clock - the caller delivers one
//! `tick()` per elapsed second (the service module does this with a
//! Tokio interval).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> RoundActive <-> Resting -> Completed
//!   ^                                    |
//!   +------------- reset ---------------+
//! ```
//!
//! Segment boundaries are only crossed when the remaining time reaches
//! zero, and the remaining time only decreases while the engine is
//! running. Pause stops the countdown without losing position.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(plan);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) at segment boundaries
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::{RunPlan, Segment, SegmentKind};
use crate::catalog::TimerKind;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// A round is underway (counting down or paused).
    RoundActive,
    /// A rest between rounds is underway.
    Resting,
    /// The whole sequence finished. Only reset leaves this phase.
    Completed,
}

/// Read-only view of the run state, published after every change.
#[derive(Debug, Clone, Serialize)]
pub struct TimerSnapshot {
    pub kind: TimerKind,
    pub phase: Phase,
    /// Whether the countdown is advancing.
    pub running: bool,
    /// 1-based; 0 while idle.
    pub current_round: u32,
    pub total_rounds: u32,
    pub remaining_secs: u32,
    pub segment_label: String,
    pub segment_secs: u32,
    pub segment_progress: f64,
    pub run_progress: f64,
    pub at: DateTime<Utc>,
}

/// Core timer engine.
///
/// Synchronous and single-owner - the caller is responsible for calling
/// `tick()` once per elapsed second. The engine enforces the run-state
/// invariants; the clock only supplies cadence.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    plan: RunPlan,
    phase: Phase,
    running: bool,
    /// 1-based round counter; 0 until the first start.
    current_round: u32,
    segment_index: usize,
    /// Remaining time in seconds for the current segment.
    remaining_secs: u32,
}

impl TimerEngine {
    /// Create a new timer engine with the given plan.
    ///
    /// Starts in the `Idle` phase, displaying the first segment's duration.
    pub fn new(plan: RunPlan) -> Self {
        let remaining_secs = plan.first_duration_secs();
        Self {
            plan,
            phase: Phase::Idle,
            running: false,
            current_round: 0,
            segment_index: 0,
            remaining_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    fn current_segment(&self) -> &Segment {
        // A plan always has at least one segment.
        &self.plan.segments()[self.segment_index]
    }

    /// 0.0 .. 1.0 progress within the current segment.
    pub fn segment_progress(&self) -> f64 {
        let total = self.current_segment().duration_secs;
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// 0.0 .. 1.0 progress across the whole run.
    pub fn run_progress(&self) -> f64 {
        let total = self.plan.total_secs() as f64;
        let elapsed_now =
            (self.current_segment().duration_secs - self.remaining_secs) as f64;
        let completed = self.plan.cumulative_secs(self.segment_index) as f64;
        ((completed + elapsed_now) / total).min(1.0)
    }

    /// Build a full state snapshot.
    pub fn snapshot(&self) -> TimerSnapshot {
        let segment = self.current_segment();
        TimerSnapshot {
            kind: self.plan.kind(),
            phase: self.phase,
            running: self.running,
            current_round: self.current_round,
            total_rounds: self.plan.total_rounds(),
            remaining_secs: self.remaining_secs,
            segment_label: segment.label.clone(),
            segment_secs: segment.duration_secs,
            segment_progress: self.segment_progress(),
            run_progress: self.run_progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from idle, or resume when paused mid-run. Ignored while
    /// running and after completion (only reset leaves `Completed`).
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Idle => {
                self.enter_segment(0);
                self.running = true;
                Some(Event::TimerStarted {
                    kind: self.plan.kind(),
                    total_rounds: self.plan.total_rounds(),
                    duration_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            Phase::RoundActive | Phase::Resting => self.resume(),
            Phase::Completed => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.phase {
            Phase::RoundActive | Phase::Resting if !self.running => {
                self.running = true;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Return to idle from any phase, restoring the first segment's
    /// duration and clearing the round counter.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Idle;
        self.running = false;
        self.current_round = 0;
        self.segment_index = 0;
        self.remaining_secs = self.plan.first_duration_secs();
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Deliver one elapsed second. Returns the boundary event when the
    /// current segment ends, `None` otherwise. Ignored unless running.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        self.advance()
    }

    /// Replace the plan. Always returns to idle - a run in progress
    /// never observes edited durations.
    pub fn set_plan(&mut self, plan: RunPlan) {
        self.plan = plan;
        self.reset();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_segment(&mut self, index: usize) {
        let segment = &self.plan.segments()[index];
        self.segment_index = index;
        self.remaining_secs = segment.duration_secs;
        self.current_round = segment.round;
        self.phase = match segment.kind {
            SegmentKind::Round => Phase::RoundActive,
            SegmentKind::Rest => Phase::Resting,
        };
    }

    /// Move past an exhausted segment: next round, rest, or completion.
    fn advance(&mut self) -> Option<Event> {
        let next = self.segment_index + 1;
        if next >= self.plan.segments().len() {
            self.phase = Phase::Completed;
            self.running = false;
            self.current_round = self.plan.total_rounds();
            self.remaining_secs = 0;
            return Some(Event::TimerCompleted {
                kind: self.plan.kind(),
                total_rounds: self.plan.total_rounds(),
                at: Utc::now(),
            });
        }
        self.enter_segment(next);
        let segment = self.current_segment();
        Some(match segment.kind {
            SegmentKind::Round => Event::RoundStarted {
                round: segment.round,
                total_rounds: self.plan.total_rounds(),
                duration_secs: segment.duration_secs,
                at: Utc::now(),
            },
            SegmentKind::Rest => Event::RestStarted {
                after_round: segment.round,
                duration_secs: segment.duration_secs,
                at: Utc::now(),
            },
        })
    }
}

//! Compiled run plans.
//!
//! Every timer kind lowers to the same shape before it runs: an ordered
//! list of timed segments, each tagged with the round it belongs to. The
//! engine only ever walks segments and never re-derives structure from
//! the originating configuration, so the three timer screens share one
//! state machine.

use serde::Serialize;

use super::config::{IntervalConfig, TimerConfig};
use crate::catalog::TimerKind;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Round,
    Rest,
}

/// One timed stretch of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Round this segment belongs to, 1-based. A rest segment carries the
    /// number of the round it follows.
    pub round: u32,
    /// Duration in seconds, always positive.
    pub duration_secs: u32,
    pub label: String,
}

/// An ordered, validated segment list for one run.
///
/// Construction goes through the compiling constructors, which reject
/// invalid configurations, so a plan always has at least one segment and
/// no zero-length segments.
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    kind: TimerKind,
    total_rounds: u32,
    segments: Vec<Segment>,
}

impl RunPlan {
    /// A single fixed countdown (the standard timer).
    pub fn standard(duration_secs: u32) -> Result<Self, ConfigError> {
        if duration_secs == 0 {
            return Err(ConfigError::ZeroRoundDuration);
        }
        Ok(Self {
            kind: TimerKind::Standard,
            total_rounds: 1,
            segments: vec![Segment {
                kind: SegmentKind::Round,
                round: 1,
                duration_secs,
                label: "Countdown".into(),
            }],
        })
    }

    /// Repeated rounds with an optional rest between consecutive rounds.
    pub fn rounds(config: &TimerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::compile_rounds(config))
    }

    /// A custom interval set repeated a number of times. Each repeat of
    /// the set counts as one round.
    pub fn intervals(config: &IntervalConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut segments = Vec::with_capacity(config.steps.len() * config.repeats as usize);
        for repeat in 1..=config.repeats {
            for step in &config.steps {
                segments.push(Segment {
                    kind: if step.rest {
                        SegmentKind::Rest
                    } else {
                        SegmentKind::Round
                    },
                    round: repeat,
                    duration_secs: step.duration_secs,
                    label: step.label.clone(),
                });
            }
        }
        Ok(Self {
            kind: TimerKind::Interval,
            total_rounds: config.repeats,
            segments,
        })
    }

    /// Requires a validated config.
    fn compile_rounds(config: &TimerConfig) -> Self {
        let mut segments = Vec::new();
        for round in 1..=config.total_rounds {
            segments.push(Segment {
                kind: SegmentKind::Round,
                round,
                duration_secs: config.round_duration_secs,
                label: format!("Round {round}"),
            });
            // No rest after the final round; zero-length and disabled
            // rests are never entered, so they never appear.
            let last = round == config.total_rounds;
            if !last && config.rest_enabled && config.rest_duration_secs > 0 {
                segments.push(Segment {
                    kind: SegmentKind::Rest,
                    round,
                    duration_secs: config.rest_duration_secs,
                    label: "Rest".into(),
                });
            }
        }
        Self {
            kind: TimerKind::Round,
            total_rounds: config.total_rounds,
            segments,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Duration of the first segment, what an idle timer displays.
    pub fn first_duration_secs(&self) -> u32 {
        self.segments[0].duration_secs
    }

    /// Total seconds from start to completion.
    pub fn total_secs(&self) -> u64 {
        self.segments.iter().map(|s| s.duration_secs as u64).sum()
    }

    /// Seconds covered by segments before `index`.
    pub fn cumulative_secs(&self, index: usize) -> u64 {
        self.segments
            .iter()
            .take(index)
            .map(|s| s.duration_secs as u64)
            .sum()
    }
}

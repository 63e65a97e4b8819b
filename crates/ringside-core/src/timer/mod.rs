mod completion;
mod config;
mod engine;
mod plan;

pub use completion::{CompletionAlert, VibrationPattern};
pub use config::{parse_duration_secs, IntervalConfig, IntervalStep, TimerConfig};
pub use engine::{Phase, TimerEngine, TimerSnapshot};
pub use plan::{RunPlan, Segment, SegmentKind};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for a round timer: the same round duration repeated,
/// with an optional rest between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Duration of one round in seconds.
    pub round_duration_secs: u32,
    /// Number of rounds in the sequence.
    pub total_rounds: u32,
    /// Rest between consecutive rounds in seconds.
    pub rest_duration_secs: u32,
    /// Whether the rest period is taken at all.
    pub rest_enabled: bool,
}

impl TimerConfig {
    /// Validated constructor.
    pub fn new(
        round_duration_secs: u32,
        total_rounds: u32,
        rest_duration_secs: u32,
        rest_enabled: bool,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            round_duration_secs,
            total_rounds,
            rest_duration_secs,
            rest_enabled,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_duration_secs == 0 {
            return Err(ConfigError::ZeroRoundDuration);
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }

    /// Number of rest periods a full run passes through. Disabled or
    /// zero-length rests never happen, and no rest follows the last round.
    pub fn rest_count(&self) -> u32 {
        if self.rest_enabled && self.rest_duration_secs > 0 {
            self.total_rounds.saturating_sub(1)
        } else {
            0
        }
    }

    /// Total seconds from start to completion.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn total_secs(&self) -> u64 {
        let rounds = (self.round_duration_secs as u64).saturating_mul(self.total_rounds as u64);
        let rests = (self.rest_duration_secs as u64).saturating_mul(self.rest_count() as u64);
        rounds.saturating_add(rests)
    }
}

impl Default for TimerConfig {
    /// Boxing-style default: 3-minute rounds, 1-minute rest, 5 rounds.
    fn default() -> Self {
        Self {
            round_duration_secs: 180,
            total_rounds: 5,
            rest_duration_secs: 60,
            rest_enabled: true,
        }
    }
}

/// One step of an interval set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalStep {
    pub label: String,
    /// Duration in seconds.
    pub duration_secs: u32,
    /// Rest steps count down like any other but are shown as recovery.
    #[serde(default)]
    pub rest: bool,
}

impl IntervalStep {
    pub fn work(label: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            label: label.into(),
            duration_secs,
            rest: false,
        }
    }

    pub fn rest(label: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            label: label.into(),
            duration_secs,
            rest: true,
        }
    }

    /// Parse a step spec of the form `label:duration` or `label:duration:rest`.
    ///
    /// The duration accepts the same forms as [`parse_duration_secs`] except
    /// `MM:SS`, which would be ambiguous inside a colon-separated spec.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let bad = |message: &str| ConfigError::BadStep {
            input: spec.to_string(),
            message: message.to_string(),
        };

        let mut parts = spec.splitn(3, ':');
        let label = parts.next().unwrap_or_default().trim();
        if label.is_empty() {
            return Err(bad("missing label"));
        }
        let duration = parts.next().ok_or_else(|| bad("missing duration"))?;
        let duration_secs = parse_duration_secs(duration).map_err(|e| match e {
            ConfigError::BadDuration { message, .. } => ConfigError::BadStep {
                input: spec.to_string(),
                message,
            },
            other => other,
        })?;
        let rest = match parts.next().map(str::trim) {
            None => false,
            Some("rest") => true,
            Some(flag) => return Err(bad(&format!("unknown flag '{flag}', expected 'rest'"))),
        };

        Ok(Self {
            label: label.to_string(),
            duration_secs,
            rest,
        })
    }
}

/// Configuration for an interval timer: a custom set of steps repeated a
/// number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalConfig {
    pub steps: Vec<IntervalStep>,
    /// How many times the whole set is repeated.
    pub repeats: u32,
}

impl IntervalConfig {
    pub fn new(steps: Vec<IntervalStep>, repeats: u32) -> Result<Self, ConfigError> {
        let config = Self { steps, repeats };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::EmptyIntervalSet);
        }
        if let Some(step) = self.steps.iter().find(|s| s.duration_secs == 0) {
            return Err(ConfigError::ZeroStepDuration {
                label: step.label.clone(),
            });
        }
        if self.steps.iter().all(|s| s.rest) {
            return Err(ConfigError::AllRestSteps);
        }
        if self.repeats == 0 {
            return Err(ConfigError::ZeroRepeats);
        }
        Ok(())
    }

    /// Total seconds from start to completion.
    pub fn total_secs(&self) -> u64 {
        let set: u64 = self.steps.iter().map(|s| s.duration_secs as u64).sum();
        set.saturating_mul(self.repeats as u64)
    }
}

/// Parse a duration picker value into whole seconds.
///
/// Accepted forms: plain seconds (`"90"`), minutes and seconds (`"1:30"`),
/// and unit notation (`"45s"`, `"3m"`, `"1h2m3s"`).
pub fn parse_duration_secs(input: &str) -> Result<u32, ConfigError> {
    let bad = |message: &str| ConfigError::BadDuration {
        input: input.to_string(),
        message: message.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(bad("empty input"));
    }

    // Plain seconds.
    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed.parse().map_err(|_| bad("value too large"));
    }

    // MM:SS.
    if let Some((minutes, seconds)) = trimmed.split_once(':') {
        let minutes: u32 = minutes
            .parse()
            .map_err(|_| bad("minutes must be a whole number"))?;
        let seconds: u32 = seconds
            .parse()
            .map_err(|_| bad("seconds must be a whole number"))?;
        if seconds >= 60 {
            return Err(bad("seconds part must be below 60"));
        }
        return minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(|| bad("value too large"));
    }

    // Unit notation.
    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in trimmed.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let multiplier = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(bad(&format!("unknown unit '{c}'"))),
        };
        let value: u64 = digits
            .parse()
            .map_err(|_| bad(&format!("missing number before '{c}'")))?;
        digits.clear();
        total = total.saturating_add(value.saturating_mul(multiplier));
    }
    if !digits.is_empty() {
        return Err(bad("trailing digits without a unit"));
    }
    u32::try_from(total).map_err(|_| bad("value too large"))
}

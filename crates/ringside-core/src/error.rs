//! Core error types for ringside-core.
//!
//! This module defines the error hierarchy using thiserror. Invalid timer
//! configurations are rejected here, before a run starts -- the engine
//! itself never observes one.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ringside-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer configuration errors
    #[error("Invalid timer configuration: {0}")]
    Config(#[from] ConfigError),

    /// Application settings errors
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Timer configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Round duration must be positive
    #[error("Round duration must be at least 1 second")]
    ZeroRoundDuration,

    /// Round count must be positive
    #[error("Total rounds must be at least 1")]
    ZeroRounds,

    /// Interval sets need at least one step
    #[error("Interval set must contain at least one step")]
    EmptyIntervalSet,

    /// Every interval step needs a positive duration
    #[error("Interval step '{label}' must last at least 1 second")]
    ZeroStepDuration { label: String },

    /// An interval set of nothing but rest never activates a round
    #[error("Interval set must contain at least one work step")]
    AllRestSteps,

    /// Repeat count must be positive
    #[error("Repeats must be at least 1")]
    ZeroRepeats,

    /// Unparseable duration input
    #[error("Cannot parse duration '{input}': {message}")]
    BadDuration { input: String, message: String },

    /// Unparseable interval step spec
    #[error("Cannot parse interval step '{input}': {message}")]
    BadStep { input: String, message: String },
}

/// Application settings errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Settings directory could not be created
    #[error("Settings directory unavailable: {0}")]
    NoSettingsDir(String),

    /// No such settings key
    #[error("Unknown settings key: {0}")]
    UnknownKey(String),

    /// Value does not fit the settings key
    #[error("Invalid value for '{key}': {message}")]
    BadValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

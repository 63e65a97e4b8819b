mod settings;

pub use settings::{AlertsConfig, Settings};

use std::path::PathBuf;

use crate::error::SettingsError;

/// Returns `~/.config/ringside[-dev]/` based on RINGSIDE_ENV.
///
/// Set RINGSIDE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the settings directory fails.
pub fn data_dir() -> Result<PathBuf, SettingsError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RINGSIDE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ringside-dev")
    } else {
        base_dir.join("ringside")
    };

    std::fs::create_dir_all(&dir).map_err(|e| SettingsError::NoSettingsDir(e.to_string()))?;
    Ok(dir)
}

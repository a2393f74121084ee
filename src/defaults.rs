//! Default values for spin configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;
use std::time::Duration;

/// Timeout applied to each individual HTTP request sent to Gate.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the default configuration file path.
///
/// Resolves to `~/.spin/config`. Falls back to `.spin/config` in the current
/// directory if the home directory cannot be determined.
///
/// This can be overridden by the `--config` CLI flag or the `SPIN_CONFIG`
/// environment variable.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".spin")
        .join("config")
}

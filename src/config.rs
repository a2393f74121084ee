//! # Configuration
//!
//! The client reads an optional YAML file describing how to reach Gate:
//!
//! ```yaml
//! gate:
//!   endpoint: https://gate.example.com
//! auth:
//!   enabled: true
//!   basic:
//!     username: deploy-bot
//!     password: s3cret
//! ```
//!
//! The file is looked up at `--config`, then `SPIN_CONFIG`, then
//! `~/.spin/config`. A missing default file is not an error; a missing file
//! the user named explicitly is. Command-line flags such as `--gate-endpoint`
//! take precedence over anything read here.

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::defaults::default_config_path;
use crate::error::{Error, Result};

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gate: GateConfig,
    pub auth: Option<AuthConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    pub basic: Option<BasicAuthConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl Config {
    /// Basic-auth credentials, if auth is enabled and configured.
    pub fn basic_auth(&self) -> Option<&BasicAuthConfig> {
        self.auth
            .as_ref()
            .filter(|auth| auth.enabled)
            .and_then(|auth| auth.basic.as_ref())
    }
}

/// Parse configuration from a YAML string. Blank input yields the defaults.
pub fn parse(yaml: &str) -> Result<Config> {
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(yaml).map_err(|e| Error::Config {
        message: e.to_string(),
    })
}

/// Parse configuration from a file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load the configuration the user asked for, or the default file if present.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            from_file(path)
        }
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!("Loading configuration from {}", path.display());
                from_file(&path)
            } else {
                debug!("No configuration file at {}, using defaults", path.display());
                Ok(Config::default())
            }
        }
    }
}

//! # Output
//!
//! This module owns everything the client prints. Command handlers never
//! write to stdout or stderr directly; they receive a [`Ui`] sink instead, so
//! tests can capture what a command said.
//!
//! ## Respecting User Preferences
//!
//! Color follows the `--color=never|always|auto` flag and, in auto mode:
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Formats
//!
//! Task records and entities are rendered as pretty JSON (the default) or
//! YAML, selected with `--output`.

use std::env;
use std::io::Write;

use clap::ValueEnum;
use console::style;

use crate::document::Document;
use crate::error::Result;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Serialization format for documents written with [`Ui::output`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

/// Renders a document in the requested format, without a trailing newline.
pub fn render(document: &Document, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Yaml => serde_yaml::to_string(document)?,
    };
    Ok(text.trim_end().to_string())
}

/// Sink for everything a command reports to the user.
pub trait Ui {
    /// Progress and informational text.
    fn info(&mut self, message: &str);

    /// Something the user should notice but that does not stop the command.
    fn warn(&mut self, message: &str);

    /// Final confirmation that a command succeeded.
    fn success(&mut self, message: &str);

    /// Machine-readable command output.
    fn output(&mut self, text: &str);
}

/// [`Ui`] that writes to the terminal.
///
/// Info and success messages go to stdout and are suppressed by `quiet`.
/// Warnings always go to stderr. Output is always written to stdout.
pub struct TerminalUi {
    config: OutputConfig,
    quiet: bool,
}

impl TerminalUi {
    pub fn new(config: OutputConfig, quiet: bool) -> Self {
        Self { config, quiet }
    }
}

impl Ui for TerminalUi {
    fn info(&mut self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    fn warn(&mut self, message: &str) {
        let line = if self.config.use_color {
            style(message).yellow().to_string()
        } else {
            message.to_string()
        };
        let _ = writeln!(std::io::stderr(), "{}", line);
    }

    fn success(&mut self, message: &str) {
        if self.quiet {
            return;
        }
        if self.config.use_color {
            println!("{}", style(message).green().bold());
        } else {
            println!("{}", message);
        }
    }

    fn output(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// [`Ui`] that keeps every message in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub infos: Vec<String>,
    pub warnings: Vec<String>,
    pub successes: Vec<String>,
    pub outputs: Vec<String>,
}

#[cfg(test)]
impl Ui for RecordingUi {
    fn info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn output(&mut self, text: &str) {
        self.outputs.push(text.to_string());
    }
}

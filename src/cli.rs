//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use spin_cli::output::{OutputConfig, OutputFormat, TerminalUi};

use crate::commands;

/// Spin - Create applications and projects through the Gate API
#[derive(Parser, Debug)]
#[command(name = "spin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every command that talks to Gate.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Gate API base URL (overrides gate.endpoint from the config file)
    #[arg(long, global = true, value_name = "URL", env = "SPIN_GATE_ENDPOINT")]
    pub gate_endpoint: Option<String>,

    /// Path to the spin config file [default: ~/.spin/config]
    #[arg(long, global = true, value_name = "PATH", env = "SPIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Print the final task record in this format
    #[arg(short, long, global = true, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Give up waiting for the task after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Suppress all output except warnings, errors and --output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage applications
    #[command(visible_aliases = ["applications", "app"])]
    Application(commands::application::ApplicationArgs),

    /// Manage projects
    #[command(visible_aliases = ["projects", "proj"])]
    Project(commands::project::ProjectArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.global.log_level);

        let output_config = OutputConfig::from_env_and_flag(&self.global.color);
        console::set_colors_enabled(output_config.use_color);
        console::set_colors_enabled_stderr(output_config.use_color);
        let mut ui = TerminalUi::new(output_config, self.global.quiet);

        match self.command {
            Commands::Application(args) => {
                commands::application::execute(args, &self.global, &mut ui)
            }
            Commands::Project(args) => commands::project::execute(args, &self.global, &mut ui),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Route `log` records to stderr. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

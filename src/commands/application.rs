//! # Application Command Implementation
//!
//! `spin application save` creates (or updates) an application through Gate.
//! The application can be described with flags, with a JSON document from
//! `--file` or stdin, or both; flags win over the document and each override
//! is reported as a warning.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use spin_cli::entity::{EntityKind, Overrides};
use spin_cli::output::Ui;

use super::save;
use crate::cli::GlobalArgs;

/// Manage applications
#[derive(Args, Debug)]
pub struct ApplicationArgs {
    #[command(subcommand)]
    pub command: ApplicationCommands,
}

#[derive(Subcommand, Debug)]
pub enum ApplicationCommands {
    /// Save the provided application
    Save(SaveApplicationArgs),
}

/// Arguments for `application save`
#[derive(Args, Debug)]
pub struct SaveApplicationArgs {
    /// JSON file describing the application (read from stdin when piped)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Name of the application
    #[arg(long, value_name = "NAME")]
    pub application_name: Option<String>,

    /// Email of the application owner
    #[arg(long, value_name = "EMAIL")]
    pub owner_email: Option<String>,

    /// Cloud providers configured for this application
    #[arg(long, value_name = "PROVIDERS", value_delimiter = ',')]
    pub cloud_providers: Vec<String>,
}

/// Execute an `application` subcommand.
pub fn execute(args: ApplicationArgs, global: &GlobalArgs, ui: &mut dyn Ui) -> Result<()> {
    match args.command {
        ApplicationCommands::Save(save_args) => {
            let overrides = Overrides {
                name: save_args.application_name,
                email: save_args.owner_email,
                cloud_providers: save_args.cloud_providers,
            };
            save::run(
                EntityKind::Application,
                save_args.file.as_deref(),
                overrides,
                global,
                ui,
            )
        }
    }
}

//! # Project Command Implementation
//!
//! `spin project save` creates a project through Gate, from flags, a JSON
//! document, or both.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use spin_cli::entity::{EntityKind, Overrides};
use spin_cli::output::Ui;

use super::save;
use crate::cli::GlobalArgs;

/// Manage projects
#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Save the provided project
    Save(SaveProjectArgs),
}

/// Arguments for `project save`
#[derive(Args, Debug)]
pub struct SaveProjectArgs {
    /// JSON file describing the project (read from stdin when piped)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Name of the project
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Email of the project owner
    #[arg(long, value_name = "EMAIL")]
    pub owner_email: Option<String>,
}

/// Execute a `project` subcommand.
pub fn execute(args: ProjectArgs, global: &GlobalArgs, ui: &mut dyn Ui) -> Result<()> {
    match args.command {
        ProjectCommands::Save(save_args) => {
            let overrides = Overrides {
                name: save_args.project_name,
                email: save_args.owner_email,
                cloud_providers: Vec::new(),
            };
            save::run(
                EntityKind::Project,
                save_args.file.as_deref(),
                overrides,
                global,
                ui,
            )
        }
    }
}

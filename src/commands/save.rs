//! Save flow shared by `application save` and `project save`
//!
//! 1. Load the optional input document (`--file` or piped stdin)
//! 2. Merge it with the explicit flags and validate
//! 3. Connect to Gate
//! 4. Submit the create job and wait for the task
//! 5. Report the outcome

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;
use std::time::Duration;

use spin_cli::config;
use spin_cli::entity::{self, EntityKind, Overrides};
use spin_cli::error::Error;
use spin_cli::gate::{GateClient, GateOptions};
use spin_cli::input;
use spin_cli::output::{render, Ui};
use spin_cli::poll::{CancelToken, RetryPolicy};
use spin_cli::submit::create_and_wait;

use crate::cli::GlobalArgs;

/// Execute a save for `kind`.
pub fn run(
    kind: EntityKind,
    file: Option<&Path>,
    overrides: Overrides,
    global: &GlobalArgs,
    ui: &mut dyn Ui,
) -> Result<()> {
    let document = input::load_document(file, true)?;
    let entity = entity::resolve(kind, document, &overrides, ui)?;
    let name = entity.get_str(entity::NAME_FIELD).unwrap_or_default().to_string();

    let client = connect(global)?;

    let token = match global.timeout {
        Some(secs) => CancelToken::with_deadline(Duration::from_secs(secs)),
        None => CancelToken::new(),
    };

    ui.info(&format!("Saving {} {}...", kind.label(), name));
    let record = create_and_wait(&client, kind, entity, &RetryPolicy::default(), &token)
        .with_context(|| format!("Encountered an error saving {} {}", kind.label(), name))?;

    if let Some(format) = global.output {
        ui.output(&render(record.document(), format)?);
    }
    ui.success(&format!("{} save succeeded", kind.title()));
    Ok(())
}

/// Build a Gate client from the flags and the config file.
fn connect(global: &GlobalArgs) -> Result<GateClient> {
    let config = config::load(global.config.as_deref()).with_context(|| match &global.config {
        Some(path) => format!("Could not load config from {}", path.display()),
        None => "Could not load config".to_string(),
    })?;

    let endpoint = global
        .gate_endpoint
        .clone()
        .or(config.gate.endpoint.clone())
        .ok_or_else(|| Error::Config {
            message: "no Gate endpoint configured; pass --gate-endpoint or set gate.endpoint in the config file"
                .to_string(),
        })?;
    debug!("Using Gate endpoint {}", endpoint);

    let options = GateOptions::new(endpoint)
        .with_insecure(global.insecure)
        .with_basic_auth(config.basic_auth().cloned());
    Ok(GateClient::new(options)?)
}

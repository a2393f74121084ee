//! # Entity Resolution
//!
//! Builds the entity payload that gets submitted to Gate, from an optional
//! input document and the explicit command-line flags.
//!
//! - When a non-empty document is supplied it is taken as the base. Each flag
//!   that is given replaces the matching field and a warning is emitted, so an
//!   override is never silent.
//! - Without a document, the name and owner flags are both required.
//!
//! Either way the resolved entity must carry a non-empty `name` and `email`
//! before anything is sent over the network.

use log::debug;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::output::Ui;

pub const NAME_FIELD: &str = "name";
pub const OWNER_FIELD: &str = "email";
pub const CLOUD_PROVIDERS_FIELD: &str = "cloudProviders";

/// The kinds of entity the client can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Application,
    Project,
}

impl EntityKind {
    /// Lowercase name used inside messages.
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Application => "application",
            EntityKind::Project => "project",
        }
    }

    /// Capitalized name used at the start of messages.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Application => "Application",
            EntityKind::Project => "Project",
        }
    }
}

/// Field values given explicitly on the command line.
///
/// Empty strings count as "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cloud_providers: Vec<String>,
}

impl Overrides {
    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|s| !s.is_empty())
    }

    fn cloud_providers(&self) -> Option<String> {
        let providers: Vec<&str> = self
            .cloud_providers
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        if providers.is_empty() {
            None
        } else {
            Some(providers.join(","))
        }
    }
}

/// Merges the input document with the flag overrides and validates the result.
pub fn resolve(
    kind: EntityKind,
    document: Option<Document>,
    overrides: &Overrides,
    ui: &mut dyn Ui,
) -> Result<Document> {
    let entity = match document.filter(|doc| !doc.is_empty()) {
        Some(mut doc) => {
            debug!("Using supplied {} document with {} fields", kind.label(), doc.len());
            if let Some(name) = overrides.name() {
                ui.warn(&format!(
                    "Overriding {} name with explicit flag values.",
                    kind.label()
                ));
                doc.insert(NAME_FIELD, name);
            }
            if let Some(email) = overrides.email() {
                ui.warn(&format!(
                    "Overriding {} owner email with explicit flag values.",
                    kind.label()
                ));
                doc.insert(OWNER_FIELD, email);
            }
            if let Some(providers) = overrides.cloud_providers() {
                ui.warn(&format!(
                    "Overriding {} cloud providers with explicit flag values.",
                    kind.label()
                ));
                doc.insert(CLOUD_PROVIDERS_FIELD, providers);
            }
            doc
        }
        None => {
            let (Some(name), Some(email)) = (overrides.name(), overrides.email()) else {
                return Err(Error::Validation {
                    message: format!("Required {} parameter missing, exiting...", kind.label()),
                });
            };
            let mut doc = Document::new();
            doc.insert(NAME_FIELD, name);
            doc.insert(OWNER_FIELD, email);
            if let Some(providers) = overrides.cloud_providers() {
                doc.insert(CLOUD_PROVIDERS_FIELD, providers);
            }
            doc
        }
    };

    validate(kind, &entity)?;
    Ok(entity)
}

fn validate(kind: EntityKind, entity: &Document) -> Result<()> {
    for field in [NAME_FIELD, OWNER_FIELD] {
        if entity.get_str(field).map_or(true, str::is_empty) {
            return Err(Error::Validation {
                message: format!("{} field '{}' is required", kind.title(), field),
            });
        }
    }
    Ok(())
}

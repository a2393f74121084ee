//! # Input Documents
//!
//! Commands accept an entity definition as JSON, either from `--file` or piped
//! on standard input. An interactive terminal on stdin is never read, so
//! running a command with flags only does not hang waiting for input.

use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use log::debug;
use serde_json::Value as JsonValue;

use crate::document::Document;
use crate::error::{Error, Result};

/// Load a JSON document from `path`, or from stdin when no path is given.
///
/// Returns `Ok(None)` when there is nothing to read and `allow_empty` is set.
pub fn load_document(path: Option<&Path>, allow_empty: bool) -> Result<Option<Document>> {
    match path {
        Some(path) => {
            debug!("Reading input document from {}", path.display());
            let file = File::open(path).map_err(|e| Error::Input {
                message: format!("{}: {}", path.display(), e),
            })?;
            read_document(file, allow_empty)
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                debug!("stdin is a terminal, not reading an input document");
                return if allow_empty {
                    Ok(None)
                } else {
                    Err(Error::Input {
                        message: "no input document supplied".to_string(),
                    })
                };
            }
            debug!("Reading input document from stdin");
            read_document(stdin.lock(), allow_empty)
        }
    }
}

/// Parse a JSON object from `reader`.
pub fn read_document<R: Read>(mut reader: R, allow_empty: bool) -> Result<Option<Document>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    if content.trim().is_empty() {
        return if allow_empty {
            Ok(None)
        } else {
            Err(Error::Input {
                message: "input was empty".to_string(),
            })
        };
    }

    let json: JsonValue = serde_json::from_str(&content).map_err(|e| Error::Input {
        message: e.to_string(),
    })?;
    Document::try_from(json).map(Some).map_err(|_| Error::Input {
        message: "expected a JSON object".to_string(),
    })
}

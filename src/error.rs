//! # Error Handling
//!
//! This module defines the centralized error type for the `spin` client. It
//! uses `thiserror` to describe every failure mode of the submit/poll/classify
//! protocol and of the plumbing around it.
//!
//! ## Taxonomy
//!
//! - **`Validation`**: required entity fields are missing. Raised before any
//!   network call is made.
//! - **`Transport`**: the connection failed or Gate answered with a non-2xx
//!   status, either at submission or on any status poll.
//! - **`Protocol`**: the task reference or a response body had an unexpected
//!   shape.
//! - **`TaskFailure`**: the task reached a terminal state that is not a
//!   success. Carries the last task record for diagnostics.
//! - **`TaskTimeout`**: the poll budget ran out while the task was still
//!   pending. Carries the last record seen, if any.
//! - **`Cancelled`**: the poll was aborted through its cancellation hook.
//!
//! None of these are retried automatically. The bounded status-poll loop is
//! the only retry in the system.

use thiserror::Error;

use crate::document::Document;

/// Main error type for spin operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required entity fields are missing or empty.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A network failure or non-2xx response from Gate.
    ///
    /// `status` is `None` when no HTTP response was received at all.
    #[error("Transport error during {operation}{}: {message}", status.map(|s| format!(" (status code: {})", s)).unwrap_or_default())]
    Transport {
        operation: String,
        status: Option<u16>,
        message: String,
    },

    /// The server answered with something the client cannot interpret.
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// The task finished without succeeding.
    #[error("Task finished with status {status}, task output was: {record}")]
    TaskFailure { status: String, record: Document },

    /// The task was still pending when the poll budget ran out.
    #[error("Task did not complete after {attempts} status checks, last task output was: {}", record.as_ref().map(|r| r.to_string()).unwrap_or_else(|| "<none>".to_string()))]
    TaskTimeout {
        attempts: u32,
        record: Option<Document>,
    },

    /// Polling was cancelled before the task reached a terminal state.
    #[error("Task polling cancelled")]
    Cancelled,

    /// The input document could not be read or parsed.
    #[error("Could not parse supplied input: {message}")]
    Input { message: String },

    /// The configuration file is invalid or incomplete.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Builds a `Transport` error from a response status outside 200-299.
    pub fn status(operation: &str, status: u16) -> Self {
        Error::Transport {
            operation: operation.to_string(),
            status: Some(status),
            message: format!("unexpected status code {}", status),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

//! # Spin Client Library
//!
//! This library implements the task protocol behind the `spin` command-line
//! tool: creating applications and projects on a remote orchestration API
//! (Gate) and waiting for the resulting asynchronous task to finish.
//!
//! ## Quick Example
//!
//! ```
//! use spin_cli::task::{task_id_from_ref, TaskPhase};
//!
//! assert_eq!(task_id_from_ref("/tasks/abc123").unwrap(), "abc123");
//! assert!(task_id_from_ref("abc123").is_err());
//!
//! assert_eq!(TaskPhase::from_status(Some("SKIPPED")), TaskPhase::Succeeded);
//! assert_eq!(TaskPhase::from_status(Some("RUNNING")), TaskPhase::Pending);
//! ```
//!
//! ## Execution Flow
//!
//! 1.  **Input** (`input`): read an optional JSON entity definition from a file
//!     or stdin.
//! 2.  **Resolution** (`entity`): merge it with explicit flags and validate the
//!     required fields.
//! 3.  **Submission** (`submit`): post a `createApplication` job and extract the
//!     task ID from the returned reference.
//! 4.  **Polling** (`poll`): check the task with quadratic backoff until it is
//!     terminal or the budget is spent.
//! 5.  **Classification** (`poll::classify`): map the last record to success,
//!     failure or timeout.
//!
//! The network sits behind the `gate::TaskApi` trait and all user-facing text
//! goes through `output::Ui`, so every step can be exercised without a server
//! or a terminal.

pub mod config;
pub mod defaults;
pub mod document;
pub mod entity;
pub mod error;
pub mod gate;
pub mod input;
pub mod output;
pub mod poll;
pub mod submit;
pub mod task;

#[cfg(test)]
mod task_proptest;
#[cfg(test)]
mod test_support;

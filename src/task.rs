//! # Tasks
//!
//! Types shared by the submitter and the poller: the job request sent to Gate,
//! the task reference it answers with, and the task record returned by each
//! status check.
//!
//! ## Status Classification
//!
//! Gate reports a raw status string per task. The client only cares about
//! three phases:
//!
//! | Raw status                        | Phase       |
//! |-----------------------------------|-------------|
//! | `SUCCEEDED`, `STOPPED`, `SKIPPED` | `Succeeded` |
//! | `TERMINAL`, `FAILED_CONTINUE`     | `Failed`    |
//! | anything else, or no status       | `Pending`   |

use serde::Serialize;

use crate::document::Document;
use crate::entity::EntityKind;
use crate::error::{Error, Result};

/// The only job type this client submits.
pub const CREATE_APPLICATION_JOB: &str = "createApplication";

/// Lifecycle phase derived from a raw task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Pending,
    Succeeded,
    Failed,
}

impl TaskPhase {
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("SUCCEEDED" | "STOPPED" | "SKIPPED") => TaskPhase::Succeeded,
            Some("TERMINAL" | "FAILED_CONTINUE") => TaskPhase::Failed,
            _ => TaskPhase::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != TaskPhase::Pending
    }
}

/// The server's view of a task at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    document: Document,
}

impl TaskRecord {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The raw `status` field, if present and a string.
    pub fn status(&self) -> Option<&str> {
        self.document.get_str("status")
    }

    pub fn phase(&self) -> TaskPhase {
        TaskPhase::from_status(self.status())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// A single job inside a [`JobRequest`].
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    #[serde(rename = "type")]
    pub job_type: String,
    pub application: Document,
}

/// The body posted to Gate's task endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct JobRequest {
    pub job: Vec<Job>,
    pub application: String,
    pub description: String,
}

impl JobRequest {
    /// Wraps a resolved entity in a `createApplication` job.
    pub fn create(kind: EntityKind, entity: Document) -> Self {
        let name = entity.get_str("name").unwrap_or_default().to_string();
        Self {
            description: format!("Create {}: {}", kind.title(), name),
            application: name,
            job: vec![Job {
                job_type: CREATE_APPLICATION_JOB.to_string(),
                application: entity,
            }],
        }
    }
}

/// Extracts the pollable task ID from a task reference such as
/// `/tasks/01HXYZ`.
///
/// The ID is the segment after the last `/`. A reference without a `/`, or
/// one ending in `/`, is rejected.
pub fn task_id_from_ref(reference: &str) -> Result<String> {
    match reference.rsplit_once('/') {
        Some((_, id)) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(Error::Protocol {
            message: format!("malformed task reference '{}'", reference),
        }),
    }
}

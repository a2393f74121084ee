//! # Task Submission
//!
//! Wraps a resolved entity in a job request, posts it to Gate once, and turns
//! the returned task reference into a task ID the poller can use.
//!
//! Submission is not idempotent on the server side, so it is never retried
//! here. Any failure, including a non-2xx answer, propagates unchanged.

use log::info;

use crate::document::{Document, Value};
use crate::entity::EntityKind;
use crate::error::{Error, Result};
use crate::gate::TaskApi;
use crate::poll::{classify, poll, Pause, RetryPolicy};
use crate::task::{task_id_from_ref, JobRequest, TaskRecord};

/// Field of the submission response holding the task reference.
pub const REF_FIELD: &str = "ref";

/// Submit `entity` and return the ID of the task Gate created for it.
pub fn submit(api: &dyn TaskApi, kind: EntityKind, entity: Document) -> Result<String> {
    let request = JobRequest::create(kind, entity);
    info!("Submitting task: {}", request.description);

    let response = api.create_task(&request)?;
    if !response.is_success() {
        return Err(Error::status("task submission", response.status));
    }

    let body = response.body.ok_or_else(|| Error::Protocol {
        message: "task submission response had no body".to_string(),
    })?;
    let reference = match body.get(REF_FIELD) {
        Some(Value::String(reference)) => reference,
        Some(other) => {
            return Err(Error::Protocol {
                message: format!("task reference is not a string: {:?}", other),
            })
        }
        None => {
            return Err(Error::Protocol {
                message: format!("task submission response is missing '{}'", REF_FIELD),
            })
        }
    };

    let task_id = task_id_from_ref(reference)?;
    info!("Submitted task {} ({})", task_id, reference);
    Ok(task_id)
}

/// Submit `entity`, wait for the task, and return its record if it succeeded.
pub fn create_and_wait(
    api: &dyn TaskApi,
    kind: EntityKind,
    entity: Document,
    policy: &RetryPolicy,
    pause: &dyn Pause,
) -> Result<TaskRecord> {
    pause.check()?;
    let task_id = submit(api, kind, entity)?;
    let outcome = poll(api, &task_id, policy, pause)?;
    classify(outcome)
}

//! In-memory stand-ins for Gate and for the inter-poll pause, shared by the
//! unit tests of the submit and poll modules.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::gate::{ApiResponse, TaskApi};
use crate::poll::Pause;
use crate::task::JobRequest;

/// Scripted [`TaskApi`].
///
/// Status checks return the queued responses in order; once the queue is
/// empty every check reports a `RUNNING` task.
pub struct FakeApi {
    create_response: RefCell<Option<Result<ApiResponse>>>,
    get_responses: RefCell<VecDeque<Result<ApiResponse>>>,
    create_calls: Cell<u32>,
    get_calls: Cell<u32>,
    submitted: RefCell<Vec<JobRequest>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            create_response: RefCell::new(None),
            get_responses: RefCell::new(VecDeque::new()),
            create_calls: Cell::new(0),
            get_calls: Cell::new(0),
            submitted: RefCell::new(Vec::new()),
        }
    }

    pub fn with_create_response(self, response: ApiResponse) -> Self {
        *self.create_response.borrow_mut() = Some(Ok(response));
        self
    }

    pub fn with_create_error(self, error: Error) -> Self {
        *self.create_response.borrow_mut() = Some(Err(error));
        self
    }

    /// Submission succeeds and answers with `{"ref": reference}`.
    pub fn with_ref(self, reference: &str) -> Self {
        let mut body = Document::new();
        body.insert("ref", reference);
        self.with_create_response(ApiResponse::new(200, Some(body)))
    }

    /// Queue one status check per entry; `None` means a record with no status.
    pub fn with_statuses(self, statuses: &[Option<&str>]) -> Self {
        for status in statuses {
            let mut record = Document::new();
            record.insert("id", "abc123");
            if let Some(status) = status {
                record.insert("status", *status);
            }
            self.push_get(Ok(ApiResponse::new(200, Some(record))));
        }
        self
    }

    /// Queue `count` successful checks with an empty body.
    pub fn with_empty_bodies(self, count: usize) -> Self {
        for _ in 0..count {
            self.push_get(Ok(ApiResponse::new(200, None)));
        }
        self
    }

    pub fn with_get_status(self, status: u16) -> Self {
        self.push_get(Ok(ApiResponse::new(status, None)));
        self
    }

    pub fn with_get_error(self, error: Error) -> Self {
        self.push_get(Err(error));
        self
    }

    fn push_get(&self, response: Result<ApiResponse>) {
        self.get_responses.borrow_mut().push_back(response);
    }

    pub fn create_calls(&self) -> u32 {
        self.create_calls.get()
    }

    pub fn get_calls(&self) -> u32 {
        self.get_calls.get()
    }

    pub fn submitted(&self) -> Vec<JobRequest> {
        self.submitted.borrow().clone()
    }
}

impl TaskApi for FakeApi {
    fn create_task(&self, request: &JobRequest) -> Result<ApiResponse> {
        self.create_calls.set(self.create_calls.get() + 1);
        self.submitted.borrow_mut().push(request.clone());
        self.create_response
            .borrow_mut()
            .take()
            .unwrap_or_else(|| panic!("unexpected task submission"))
    }

    fn get_task(&self, _id: &str) -> Result<ApiResponse> {
        self.get_calls.set(self.get_calls.get() + 1);
        self.get_responses.borrow_mut().pop_front().unwrap_or_else(|| {
            let mut record = Document::new();
            record.insert("id", "abc123");
            record.insert("status", "RUNNING");
            Ok(ApiResponse::new(200, Some(record)))
        })
    }
}

/// [`Pause`] that records each requested delay and returns at once.
#[derive(Default)]
pub struct RecordingPause {
    delays: RefCell<Vec<Duration>>,
}

impl RecordingPause {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.borrow().clone()
    }
}

impl Pause for RecordingPause {
    fn pause(&self, delay: Duration) -> Result<()> {
        self.delays.borrow_mut().push(delay);
        Ok(())
    }
}

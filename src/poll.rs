//! # Task Polling
//!
//! After a job is submitted, Gate processes it asynchronously. This module
//! waits for the task to finish by repeatedly reading its record, then turns
//! the last record into a success or an error.
//!
//! ## Schedule
//!
//! The first status check happens immediately. While the task is still
//! pending and fewer than [`RetryPolicy::max_attempts`] checks have been made,
//! the poller pauses and checks again. With the default policy that is five
//! checks in total, separated by pauses of 1, 4, 9 and 16 seconds
//! (`attempt²`, no jitter).
//!
//! A transport error, a non-2xx status or an undecodable body on any check
//! aborts the whole poll immediately. Such failures are never retried, so a
//! broken connection is not mistaken for a slow task.
//!
//! ## Cancellation
//!
//! Pauses go through the [`Pause`] trait. [`CancelToken`] is the production
//! implementation: it sleeps on a condition variable that another thread can
//! signal with [`CancelToken::cancel`], and it can carry an overall deadline.
//! Tests provide a pause that records the requested delays without sleeping.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::gate::TaskApi;
use crate::task::{TaskPhase, TaskRecord};

/// Default number of status checks, including the first one.
pub const MAX_POLL_ATTEMPTS: u32 = 5;

/// Longest single condvar wait when neither the pause nor the deadline fits in an [`Instant`].
const MAX_WAIT_SLICE: Duration = Duration::from_secs(3600);

/// `attempt²` seconds.
pub fn quadratic_delay(attempt: u32) -> Duration {
    Duration::from_secs(u64::from(attempt).pow(2))
}

/// How many times to check a task and how long to wait between checks.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: fn(u32) -> Duration,
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least one check.
    pub fn new(max_attempts: u32, delay: fn(u32) -> Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn quadratic() -> Self {
        Self::new(MAX_POLL_ATTEMPTS, quadratic_delay)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause to take after check number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        (self.delay)(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::quadratic()
    }
}

/// Blocking wait between status checks.
pub trait Pause {
    /// Wait for `delay`, or fail with [`Error::Cancelled`] if interrupted.
    fn pause(&self, delay: Duration) -> Result<()>;

    /// Fail with [`Error::Cancelled`] if the caller already gave up.
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

/// Cancellation handle shared between the polling thread and whoever may
/// want to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<(Mutex<bool>, Condvar)>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that cancels itself once `timeout` has elapsed from now.
    ///
    /// A timeout too large to represent as an [`Instant`] means no deadline.
    pub fn with_deadline(timeout: Duration) -> Self {
        Self {
            state: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Cancel the token and wake any thread paused on it.
    pub fn cancel(&self) {
        let (lock, cvar) = &*self.state;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.state;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) || self.deadline_passed(Instant::now())
    }

    fn deadline_passed(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

impl Pause for CancelToken {
    fn pause(&self, delay: Duration) -> Result<()> {
        let wake_at = Instant::now().checked_add(delay);
        let (lock, cvar) = &*self.state;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            let now = Instant::now();
            if *cancelled || self.deadline_passed(now) {
                return Err(Error::Cancelled);
            }
            if wake_at.is_some_and(|wake_at| now >= wake_at) {
                return Ok(());
            }
            let until = match (self.deadline, wake_at) {
                (Some(deadline), Some(wake_at)) => deadline.min(wake_at),
                (Some(deadline), None) => deadline,
                (None, Some(wake_at)) => wake_at,
                (None, None) => now + MAX_WAIT_SLICE,
            };
            let (guard, _) = cvar
                .wait_timeout(cancelled, until.saturating_duration_since(now))
                .unwrap_or_else(PoisonError::into_inner);
            cancelled = guard;
        }
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// The state the poller stopped in.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    /// The most recent record, `None` if Gate never returned one.
    pub record: Option<TaskRecord>,
    /// Number of status checks performed.
    pub attempts: u32,
}

impl PollOutcome {
    pub fn phase(&self) -> TaskPhase {
        self.record
            .as_ref()
            .map_or(TaskPhase::Pending, TaskRecord::phase)
    }

    /// True if the budget ran out before a terminal state was seen.
    pub fn exhausted(&self) -> bool {
        !self.phase().is_terminal()
    }
}

/// Check the task until it is terminal or the retry budget is spent.
pub fn poll(
    api: &dyn TaskApi,
    task_id: &str,
    policy: &RetryPolicy,
    pause: &dyn Pause,
) -> Result<PollOutcome> {
    pause.check()?;
    let mut attempts = 1;
    let mut record = fetch(api, task_id)?;

    while phase_of(&record) == TaskPhase::Pending && attempts < policy.max_attempts() {
        let delay = policy.delay_after(attempts);
        debug!(
            "Task {} still pending after check {}, waiting {:?}",
            task_id, attempts, delay
        );
        pause.pause(delay)?;
        attempts += 1;
        record = fetch(api, task_id)?;
    }

    let outcome = PollOutcome { record, attempts };
    if outcome.exhausted() {
        warn!("Task {} still pending after {} checks", task_id, attempts);
    } else {
        info!(
            "Stopped polling task {} after {} checks ({:?})",
            task_id,
            attempts,
            outcome.phase()
        );
    }
    Ok(outcome)
}

fn phase_of(record: &Option<TaskRecord>) -> TaskPhase {
    record.as_ref().map_or(TaskPhase::Pending, TaskRecord::phase)
}

fn fetch(api: &dyn TaskApi, task_id: &str) -> Result<Option<TaskRecord>> {
    let response = api.get_task(task_id)?;
    if !response.is_success() {
        return Err(Error::status("task status check", response.status));
    }
    Ok(response.body.map(TaskRecord::new))
}

/// Turn the poller's final state into a user-visible result.
///
/// Only a success status yields `Ok`. A terminal failure becomes
/// [`Error::TaskFailure`]; a task that was still pending when the budget ran
/// out becomes [`Error::TaskTimeout`].
pub fn classify(outcome: PollOutcome) -> Result<TaskRecord> {
    match (outcome.phase(), outcome.record) {
        (TaskPhase::Succeeded, Some(record)) => Ok(record),
        (TaskPhase::Failed, Some(record)) => Err(Error::TaskFailure {
            status: record.status().unwrap_or_default().to_string(),
            record: record.into_document(),
        }),
        (_, record) => Err(Error::TaskTimeout {
            attempts: outcome.attempts,
            record: record.map(TaskRecord::into_document),
        }),
    }
}

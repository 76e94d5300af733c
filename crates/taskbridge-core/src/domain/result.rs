//! ExecutionResult: the one outcome record produced per task run.
//!
//! Results are created by the work function (success / work failure) or by the
//! strategy (cancellation). When the run goes through `TaskExecutor`, the
//! executor stamps run metadata (run id, effective priority, timestamps) before
//! anyone else sees the value; after that it is never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{ExecutionError, WorkError};
use super::ids::{RunId, TaskId};
use super::priority::Priority;
use super::task::Task;

/// Classification of an unsuccessful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The run was cancelled before the work started.
    Cancelled,
    /// The work returned an error.
    WorkFailed,
    /// The work panicked; the panic was caught.
    Panicked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    task_id: TaskId,
    task_title: String,
    succeeded: bool,
    message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    failure: Option<FailureKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    run_id: Option<RunId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
}

impl ExecutionResult {
    pub fn success(task: &Task, message: impl Into<String>) -> Self {
        Self::new(task, true, message.into(), None)
    }

    pub fn failure(task: &Task, error: &ExecutionError) -> Self {
        let kind = match error {
            ExecutionError::Cancelled => FailureKind::Cancelled,
            ExecutionError::Work(WorkError::Failed(_)) => FailureKind::WorkFailed,
            ExecutionError::Work(WorkError::Panicked(_)) => FailureKind::Panicked,
        };
        Self::new(task, false, format!("{}: {error}", task.title()), Some(kind))
    }

    pub fn cancelled(task: &Task) -> Self {
        Self::failure(task, &ExecutionError::Cancelled)
    }

    fn new(task: &Task, succeeded: bool, message: String, failure: Option<FailureKind>) -> Self {
        Self {
            task_id: task.id(),
            task_title: task.title().to_string(),
            succeeded,
            message,
            failure,
            run_id: None,
            priority: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Attach run metadata. Only the executor calls this, before publishing.
    pub(crate) fn stamped(
        mut self,
        run_id: RunId,
        priority: Priority,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        self.run_id = Some(run_id);
        self.priority = Some(priority);
        self.started_at = Some(started_at);
        self.finished_at = Some(finished_at);
        self
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn task_title(&self) -> &str {
        &self.task_title
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure
    }

    pub fn is_cancelled(&self) -> bool {
        self.failure == Some(FailureKind::Cancelled)
    }

    pub fn run_id(&self) -> Option<RunId> {
        self.run_id
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }
}

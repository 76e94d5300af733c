//! Task: immutable description of a unit of work.
//!
//! A task is built once (directly, through [`TaskBuilder`], or by adapting an
//! [`ExternalTask`]) and never mutated afterwards. "Cloning with changes" goes
//! through [`Task::derive`], which copies every field into a new builder.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::TaskError;
use super::ids::TaskId;
use super::priority::Priority;

/// Broad category of a task. Informational, like `declared_priority`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Simple,
    Recurring,
    Deadline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    kind: TaskKind,

    /// Priority hint supplied by whoever created the task.
    ///
    /// Resolvers are free to ignore it; none of the built-in ones read it.
    #[serde(skip_serializing_if = "Option::is_none")]
    declared_priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    assignee: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    metadata: BTreeMap<String, serde_json::Value>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskError> {
        Self::builder(title).description(description).build()
    }

    pub fn builder(title: impl Into<String>) -> TaskBuilder {
        TaskBuilder::new(title)
    }

    pub fn simple(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskError> {
        Self::new(title, description)
    }

    pub fn recurring(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskError> {
        Self::builder(title)
            .description(description)
            .kind(TaskKind::Recurring)
            .build()
    }

    pub fn with_deadline(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDate,
    ) -> Result<Self, TaskError> {
        Self::builder(title)
            .description(description)
            .deadline(deadline)
            .build()
    }

    /// Copy every field into a builder for a new task (fresh id).
    pub fn derive(&self) -> TaskBuilder {
        TaskBuilder {
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind,
            declared_priority: self.declared_priority,
            deadline: self.deadline,
            assignee: self.assignee.clone(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn declared_priority(&self) -> Option<Priority> {
        self.declared_priority
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    pub fn assignee(&self) -> Option<&str> {
        self.assignee.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    pub fn meta(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}

/// Fluent builder for [`Task`].
///
/// ```ignore
/// let task = Task::builder("Implement builder")
///     .description("Create a builder for tasks")
///     .priority(Priority::High)
///     .assignee("Roberto G.")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    title: String,
    description: String,
    kind: TaskKind,
    declared_priority: Option<Priority>,
    deadline: Option<NaiveDate>,
    assignee: Option<String>,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl TaskBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            kind: TaskKind::default(),
            declared_priority: None,
            deadline: None,
            assignee: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.declared_priority = Some(priority);
        self
    }

    /// Setting a deadline also marks the task as [`TaskKind::Deadline`].
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self.kind = TaskKind::Deadline;
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Task, TaskError> {
        self.build_with_id(TaskId::generate())
    }

    /// Build with a caller-supplied id. The title check still applies.
    pub fn build_with_id(self, id: TaskId) -> Result<Task, TaskError> {
        if self.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            kind: self.kind,
            declared_priority: self.declared_priority,
            deadline: self.deadline,
            assignee: self.assignee,
            metadata: self.metadata,
        })
    }
}

/// Wire form of [`Task`]; every decoded task goes through the builder checks.
///
/// A missing `id` gets a fresh one.
#[derive(Deserialize)]
struct TaskRecord {
    #[serde(default)]
    id: Option<TaskId>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    kind: TaskKind,
    #[serde(default)]
    declared_priority: Option<Priority>,
    #[serde(default)]
    deadline: Option<NaiveDate>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let builder = TaskBuilder {
            title: record.title,
            description: record.description,
            kind: record.kind,
            declared_priority: record.declared_priority,
            deadline: record.deadline,
            assignee: record.assignee,
            metadata: record.metadata,
        };
        builder.build_with_id(record.id.unwrap_or_else(TaskId::generate))
    }
}

/// Task record as exposed by a third-party task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTask {
    pub task_name: String,
    pub task_detail: String,
    pub is_completed: bool,
}

impl ExternalTask {
    pub const COMPLETED_KEY: &'static str = "external.completed";
}

impl TryFrom<ExternalTask> for Task {
    type Error = TaskError;

    fn try_from(external: ExternalTask) -> Result<Self, Self::Error> {
        Task::builder(external.task_name)
            .description(external.task_detail)
            .meta(ExternalTask::COMPLETED_KEY, external.is_completed)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_blank_title_is_rejected() {
        assert_eq!(Task::new("", "x").unwrap_err(), TaskError::EmptyTitle);
        assert_eq!(Task::new("   ", "x").unwrap_err(), TaskError::EmptyTitle);
    }

    #[test]
    fn builder_sets_every_field() {
        let deadline = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let task = Task::builder("Implement Builder Pattern")
            .description("Create a builder pattern example")
            .deadline(deadline)
            .priority(Priority::High)
            .assignee("Roberto G.")
            .meta("attachments", serde_json::json!(["initialFile.doc"]))
            .build()
            .unwrap();

        assert_eq!(task.title(), "Implement Builder Pattern");
        assert_eq!(task.kind(), TaskKind::Deadline);
        assert_eq!(task.deadline(), Some(deadline));
        assert_eq!(task.declared_priority(), Some(Priority::High));
        assert_eq!(task.assignee(), Some("Roberto G."));
        assert_eq!(task.meta("attachments").unwrap()[0], "initialFile.doc");
    }

    #[test]
    fn factory_helpers_pick_kind() {
        assert_eq!(Task::simple("a", "").unwrap().kind(), TaskKind::Simple);
        assert_eq!(Task::recurring("b", "").unwrap().kind(), TaskKind::Recurring);

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let task = Task::with_deadline("c", "", date).unwrap();
        assert_eq!(task.kind(), TaskKind::Deadline);
        assert_eq!(task.deadline(), Some(date));
    }

    #[test]
    fn derive_copies_fields_with_fresh_id() {
        let original = Task::builder("Basic Task")
            .priority(Priority::Medium)
            .meta("attachments", serde_json::json!(["a.doc"]))
            .build()
            .unwrap();

        let derived = original
            .derive()
            .priority(Priority::High)
            .assignee("John Doe")
            .build()
            .unwrap();

        assert_ne!(derived.id(), original.id());
        assert_eq!(derived.title(), original.title());
        assert_eq!(derived.metadata(), original.metadata());
        assert_eq!(derived.declared_priority(), Some(Priority::High));
        assert_eq!(original.declared_priority(), Some(Priority::Medium));
        assert_eq!(original.assignee(), None);
    }

    #[test]
    fn build_with_id_keeps_the_id_and_checks_the_title() {
        let id = TaskId::generate();
        let task = Task::builder("t").build_with_id(id).unwrap();
        assert_eq!(task.id(), id);

        let err = Task::builder(" ").build_with_id(id).unwrap_err();
        assert_eq!(err, TaskError::EmptyTitle);
    }

    #[test]
    fn json_round_trip_keeps_every_field() {
        let task = Task::builder("Quarterly Report")
            .description("numbers")
            .deadline(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
            .priority(Priority::Medium)
            .assignee("finance")
            .meta("pages", 12)
            .build()
            .unwrap();

        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, task);
    }

    #[test]
    fn decoding_fills_defaults_and_a_fresh_id() {
        let task: Task = serde_json::from_str(r#"{"title": "Cleanup"}"#).unwrap();
        assert_eq!(task.title(), "Cleanup");
        assert_eq!(task.description(), "");
        assert_eq!(task.kind(), TaskKind::Simple);
        assert_eq!(task.declared_priority(), None);
        assert!(task.metadata().is_empty());
    }

    #[test]
    fn decoding_rejects_an_empty_title() {
        let err = serde_json::from_str::<Task>(r#"{"title": ""}"#).unwrap_err();
        assert!(err.to_string().contains("task title must not be empty"));
    }

    #[test]
    fn clone_keeps_identity() {
        let task = Task::new("t", "").unwrap();
        assert_eq!(task.clone().id(), task.id());
    }

    #[test]
    fn external_task_is_adapted() {
        let external = ExternalTask {
            task_name: "API Integration".to_string(),
            task_detail: "Integrate external task management API.".to_string(),
            is_completed: false,
        };

        let task = Task::try_from(external).unwrap();
        assert_eq!(task.title(), "API Integration");
        assert_eq!(task.description(), "Integrate external task management API.");
        assert_eq!(task.meta(ExternalTask::COMPLETED_KEY), Some(&serde_json::json!(false)));
    }

    #[test]
    fn external_task_without_name_is_rejected() {
        let external = ExternalTask {
            task_name: String::new(),
            task_detail: "detail".to_string(),
            is_completed: true,
        };
        assert!(Task::try_from(external).is_err());
    }
}

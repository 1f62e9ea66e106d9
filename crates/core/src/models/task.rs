//! Task snapshot types
//!
//! These mirror the `listTasks()` payload of the task collaborator. The core
//! treats every `TaskNode` as an immutable snapshot for one layout pass.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer identity of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    /// Every status, in legend order
    pub const ALL: [Self; 4] = [
        Self::InProgress,
        Self::Completed,
        Self::Blocked,
        Self::Pending,
    ];

    /// Human readable label drawn under the node title
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Blocked => "Blocked",
        }
    }

    /// Wire representation used by the task collaborator
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A task as delivered by `listTasks()`
///
/// `dependencies` lists the ids this task is blocked by. Unknown ids are
/// tolerated here and dropped later by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

impl TaskNode {
    /// Creates a pending task with no dependencies
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            status: TaskStatus::default(),
            dependencies: Vec::new(),
        }
    }

    /// Builder pattern: set status
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder pattern: set the ids this task depends on
    #[must_use]
    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = i64>) -> Self {
        self.dependencies = dependencies.into_iter().map(TaskId::new).collect();
        self
    }
}

/// Parses a `listTasks()` JSON array
///
/// # Errors
///
/// Returns `Error::JsonParseFailed` for malformed JSON or an unknown status.
pub fn parse_tasks(json: &str) -> Result<Vec<TaskNode>> {
    serde_json::from_str(json).map_err(|e| Error::json_parse_failed(e.to_string()))
}

/// Reads a `listTasks()` JSON array from disk
///
/// # Errors
///
/// Returns `Error::FileReadFailed` if the file cannot be read, otherwise the
/// errors of [`parse_tasks`].
pub fn load_tasks(path: &Path) -> Result<Vec<TaskNode>> {
    let content =
        fs::read_to_string(path).map_err(|e| Error::file_read_failed(path, e.to_string()))?;
    parse_tasks(&content)
}

//! # Add-dependency contract
//!
//! The task collaborator owns cycle detection. When it refuses a new edge it
//! answers with `{ "error": "...", "path": [1, 4, 2, 1] }`; this module turns
//! that payload into the message shown to the user and guards the UI against
//! duplicate submissions while a request is in flight.
//!
//! A rejection is never fatal: the caller keeps its current snapshot, so the
//! layout and viewport stay exactly as they were.

use async_trait::async_trait;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{TaskId, TaskNode};

/// Separator between ids of a rejected cycle path
pub const PATH_SEPARATOR: &str = " → ";

pub const FALLBACK_MESSAGE: &str = "Failed to add dependency. Please try again.";
pub const SUCCESS_MESSAGE: &str = "Dependency added successfully!";
/// `error` the collaborator reports for a refused edge
pub const CYCLE_ERROR: &str = "Circular dependency detected";

/// Failure payload returned by the collaborator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DependencyRejection {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub path: Option<Vec<TaskId>>,
}

impl DependencyRejection {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            path: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl IntoIterator<Item = i64>) -> Self {
        self.path = Some(path.into_iter().map(TaskId::new).collect());
        self
    }

    /// The rejection the collaborator sends for `task -> task`
    #[must_use]
    pub fn self_loop(task: TaskId) -> Self {
        Self {
            error: CYCLE_ERROR.to_string(),
            path: Some(vec![task, task]),
        }
    }

    /// User-visible message, e.g. `Circular dependency detected Cycle: 1 → 4 → 1`
    #[must_use]
    pub fn message(&self) -> String {
        let error = if self.error.trim().is_empty() {
            FALLBACK_MESSAGE
        } else {
            self.error.as_str()
        };

        match self.path.as_deref() {
            Some(path) if !path.is_empty() => {
                format!("{error} Cycle: {}", path.iter().join(PATH_SEPARATOR))
            }
            _ => error.to_string(),
        }
    }
}

/// Errors from the task collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("{}", .0.message())]
    Rejected(DependencyRejection),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Message for the user; transport details stay in the logs
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(rejection) => rejection.message(),
            Self::Transport(_) | Self::Decode(_) => FALLBACK_MESSAGE.to_string(),
        }
    }
}

/// Local refusals that never reach the collaborator
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    #[error("a dependency request is already in flight")]
    InFlight,

    #[error("task {0} cannot depend on itself")]
    SelfDependency(TaskId),
}

/// The external task collaborator
///
/// Not `Send`: the browser HTTP client lives on the single UI thread.
#[async_trait(?Send)]
pub trait TaskBackend {
    /// Current task snapshot
    async fn list_tasks(&self) -> Result<Vec<TaskNode>, BackendError>;

    /// Makes `task` depend on `depends_on`; may be rejected with a cycle path
    async fn add_dependency(&self, task: TaskId, depends_on: TaskId) -> Result<(), BackendError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Pending {
        task: TaskId,
        depends_on: TaskId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Failure(String),
}

impl Feedback {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Result of one add-dependency round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub feedback: Feedback,
    /// Snapshot to lay out next: refreshed on success, unchanged otherwise
    pub tasks: Vec<TaskNode>,
    /// `tasks` came from a fresh `list_tasks` call
    pub refreshed: bool,
}

/// In-flight guard and feedback state for the dependency selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyEditor {
    state: EditorState,
    feedback: Option<Feedback>,
}

impl DependencyEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, EditorState::Pending { .. })
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Marks a request as in flight
    ///
    /// # Errors
    ///
    /// Returns `EditorError::InFlight` while another request is pending and
    /// `EditorError::SelfDependency` when `task == depends_on`; the latter also
    /// sets failure feedback.
    pub fn begin(&mut self, task: TaskId, depends_on: TaskId) -> Result<(), EditorError> {
        if self.is_pending() {
            return Err(EditorError::InFlight);
        }
        if task == depends_on {
            let rejection = DependencyRejection::self_loop(task);
            self.feedback = Some(Feedback::Failure(rejection.message()));
            return Err(EditorError::SelfDependency(task));
        }
        self.state = EditorState::Pending { task, depends_on };
        self.feedback = None;
        Ok(())
    }

    /// Returns to idle and records the outcome feedback
    pub fn finish(&mut self, feedback: Feedback) {
        self.state = EditorState::Idle;
        self.feedback = Some(feedback);
    }

    /// Drops any feedback (the success message timer)
    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// Full round trip: guard, call, refresh, feedback
    ///
    /// # Errors
    ///
    /// Returns an `EditorError` when the request is refused locally; the
    /// collaborator is not called in that case.
    pub async fn submit<B>(
        &mut self,
        backend: &B,
        task: TaskId,
        depends_on: TaskId,
        current: &[TaskNode],
    ) -> Result<SubmitOutcome, EditorError>
    where
        B: TaskBackend + ?Sized,
    {
        self.begin(task, depends_on)?;
        let outcome = run_submission(backend, task, depends_on, current).await;
        self.finish(outcome.feedback.clone());
        Ok(outcome)
    }
}

/// Calls the collaborator and, on success, fetches the refreshed snapshot
///
/// Split from [`DependencyEditor::submit`] so a UI can keep the editor in a
/// reactive cell and only touch it before and after the await.
pub async fn run_submission<B>(
    backend: &B,
    task: TaskId,
    depends_on: TaskId,
    current: &[TaskNode],
) -> SubmitOutcome
where
    B: TaskBackend + ?Sized,
{
    match backend.add_dependency(task, depends_on).await {
        Ok(()) => {
            info!(%task, %depends_on, "dependency added");
            match backend.list_tasks().await {
                Ok(tasks) => SubmitOutcome {
                    feedback: Feedback::Success(SUCCESS_MESSAGE.to_string()),
                    tasks,
                    refreshed: true,
                },
                Err(err) => {
                    warn!(error = %err, "dependency added but task refresh failed");
                    SubmitOutcome {
                        feedback: Feedback::Success(SUCCESS_MESSAGE.to_string()),
                        tasks: current.to_vec(),
                        refreshed: false,
                    }
                }
            }
        }
        Err(err) => {
            warn!(%task, %depends_on, error = %err, "dependency rejected");
            SubmitOutcome {
                feedback: Feedback::Failure(err.user_message()),
                tasks: current.to_vec(),
                refreshed: false,
            }
        }
    }
}

/// Tasks offered as blockers for `current`: every task except itself
#[must_use]
pub fn candidate_targets(tasks: &[TaskNode], current: TaskId) -> Vec<&TaskNode> {
    tasks.iter().filter(|task| task.id != current).collect()
}

/// Selector option text, `"<id>: <title>"`
#[must_use]
pub fn option_label(task: &TaskNode) -> String {
    format!("{}: {}", task.id, task.title)
}

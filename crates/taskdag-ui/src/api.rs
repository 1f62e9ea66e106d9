//! HTTP client for the task service
//!
//! `GET  {base}/tasks/` returns the task snapshot.
//! `POST {base}/tasks/{id}/dependencies/` with `{"depends_on_id": n}` adds an
//! edge; a refused edge comes back as an error status carrying
//! `{"error": "...", "path": [...]}`.

use async_trait::async_trait;
use serde::Serialize;
use taskdag_core::dependency::{BackendError, DependencyRejection, TaskBackend};
use taskdag_core::{TaskId, TaskNode};

/// Base URL when `TASKDAG_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Serialize)]
struct AddDependencyBody {
    depends_on_id: TaskId,
}

/// [`TaskBackend`] over HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBackend {
    base_url: String,
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(option_env!("TASKDAG_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tasks_url(&self) -> String {
        format!("{}/tasks/", self.base_url)
    }

    #[must_use]
    pub fn dependencies_url(&self, task: TaskId) -> String {
        format!("{}/tasks/{task}/dependencies/", self.base_url)
    }
}

/// Maps an error response to a backend error
///
/// A body with a non-empty `error` field is a rejection from the service;
/// anything else is reported as a transport failure.
#[must_use]
pub fn error_from_response(status: u16, body: &str) -> BackendError {
    match serde_json::from_str::<DependencyRejection>(body) {
        Ok(rejection) if !rejection.error.trim().is_empty() => BackendError::Rejected(rejection),
        _ => BackendError::Transport(format!("HTTP {status}")),
    }
}

#[async_trait(?Send)]
impl TaskBackend for HttpBackend {
    async fn list_tasks(&self) -> Result<Vec<TaskNode>, BackendError> {
        #[cfg(target_arch = "wasm32")]
        {
            use gloo_net::http::Request;

            let response = Request::get(&self.tasks_url())
                .send()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))?;

            if !response.ok() {
                return Err(BackendError::Transport(format!("HTTP {}", response.status())));
            }

            response
                .json::<Vec<TaskNode>>()
                .await
                .map_err(|e| BackendError::Decode(e.to_string()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(BackendError::Transport(format!(
                "no HTTP client off wasm32: {}",
                self.tasks_url()
            )))
        }
    }

    async fn add_dependency(&self, task: TaskId, depends_on: TaskId) -> Result<(), BackendError> {
        let body = AddDependencyBody {
            depends_on_id: depends_on,
        };

        #[cfg(target_arch = "wasm32")]
        {
            use gloo_net::http::Request;

            let response = Request::post(&self.dependencies_url(task))
                .json(&body)
                .map_err(|e| BackendError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))?;

            if response.ok() {
                return Ok(());
            }

            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(error_from_response(status, &text))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = body;
            Err(BackendError::Transport(format!(
                "no HTTP client off wasm32: {}",
                self.dependencies_url(task)
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_urls() {
        let backend = HttpBackend::new("http://localhost:8000/api/");
        assert_eq!(backend.base_url(), "http://localhost:8000/api");
        assert_eq!(backend.tasks_url(), "http://localhost:8000/api/tasks/");
        assert_eq!(
            backend.dependencies_url(TaskId::new(7)),
            "http://localhost:8000/api/tasks/7/dependencies/"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = AddDependencyBody {
            depends_on_id: TaskId::new(3),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"depends_on_id":3}"#
        );
    }

    #[test]
    fn test_cycle_rejection_is_decoded() {
        let err = error_from_response(
            400,
            r#"{"error": "Circular dependency detected.", "path": [2, 5, 2]}"#,
        );
        assert_eq!(
            err.user_message(),
            "Circular dependency detected. Cycle: 2 → 5 → 2"
        );
    }

    #[test]
    fn test_unstructured_error_falls_back() {
        let err = error_from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err, BackendError::Transport("HTTP 502".into()));
        assert_eq!(
            err.user_message(),
            "Failed to add dependency. Please try again."
        );

        let err = error_from_response(400, r#"{"detail": "nope"}"#);
        assert!(matches!(err, BackendError::Transport(_)));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_backend_reports_transport_error() {
        let backend = HttpBackend::default();
        let result = futures::executor::block_on(backend.list_tasks());
        assert!(matches!(result, Err(BackendError::Transport(_))));
    }
}

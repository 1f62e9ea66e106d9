//! Error types for the UI crate
//!
//! Collaborator failures stay `BackendError` from the core; this type only
//! covers the browser side.

use thiserror::Error;

/// Errors raised while talking to the browser
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Canvas lookup, 2D context acquisition or a rejected drawing call
    #[error("Canvas error: {0}")]
    Canvas(String),
}

pub type Result<T> = std::result::Result<T, UiError>;

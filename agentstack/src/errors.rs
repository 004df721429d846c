//! Error types for the agentstack pipeline.
//!
//! Two layers of errors exist:
//!
//! - [`StageError`] is raised by a stage transformation. The pipeline executor
//!   catches it and turns it into a failure-shaped
//!   [`ProcessingResponse`](crate::core::ProcessingResponse).
//! - [`AgentStackError`] is what callers of the orchestrator can observe as a
//!   raised error: validation failures, unexpected failures outside the stage
//!   boundary, and configuration or IO problems.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a failure, carried on failure responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input failed orchestrator validation.
    InvalidContent,
    /// Input exceeded the configured maximum size.
    InputTooLarge,
    /// A stage transformation failed.
    StageFailure,
    /// The run exceeded the configured request timeout.
    Timeout,
    /// A failure outside the stage invocation boundary.
    Unexpected,
    /// Invalid configuration.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContent => write!(f, "invalid_content"),
            Self::InputTooLarge => write!(f, "input_too_large"),
            Self::StageFailure => write!(f, "stage_failure"),
            Self::Timeout => write!(f, "timeout"),
            Self::Unexpected => write!(f, "unexpected"),
            Self::Config => write!(f, "config"),
        }
    }
}

/// Error raised by a stage transformation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// Content is longer than the parser accepts.
    #[error("Data too large. Maximum {max} characters allowed (got {length}).")]
    InputTooLarge {
        /// Length of the rejected content in characters.
        length: usize,
        /// Configured maximum in characters.
        max: usize,
    },

    /// The pipeline ran to completion but produced no content.
    #[error("Pipeline produced no content")]
    EmptyOutput,

    /// Any other stage failure.
    #[error("Stage {stage} failed: {message}")]
    Failed {
        /// The failing stage.
        stage: String,
        /// What went wrong.
        message: String,
    },
}

impl StageError {
    /// Creates a general stage failure.
    #[must_use]
    pub fn failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Returns the error classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputTooLarge { .. } => ErrorKind::InputTooLarge,
            Self::EmptyOutput | Self::Failed { .. } => ErrorKind::StageFailure,
        }
    }
}

/// The main error type for agentstack operations.
#[derive(Debug, Error)]
pub enum AgentStackError {
    /// Content failed orchestrator validation.
    #[error("{0}")]
    InvalidContent(String),

    /// A failure outside the stage boundary.
    #[error("Unexpected failure: {0}")]
    Unexpected(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AgentStackError {
    /// Creates the canonical validation error for rejected content.
    #[must_use]
    pub fn invalid_content() -> Self {
        Self::InvalidContent("Content must be a non-empty string".to_string())
    }

    /// Returns the error classification.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidContent(_) => ErrorKind::InvalidContent,
            Self::Config(_) => ErrorKind::Config,
            Self::Unexpected(_) | Self::Io(_) | Self::Serialization(_) => ErrorKind::Unexpected,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T, E = AgentStackError> = std::result::Result<T, E>;

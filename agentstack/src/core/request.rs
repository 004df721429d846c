//! Request and response envelopes.

use crate::errors::ErrorKind;
use crate::utils::generate_request_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single unit of content to process.
///
/// Created once per orchestrator run and consumed by the pipeline executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingRequest {
    content: String,
    request_id: String,
}

impl ProcessingRequest {
    /// Creates a request, generating an id when none (or an empty one) is given.
    #[must_use]
    pub fn new(content: impl Into<String>, request_id: Option<String>) -> Self {
        let request_id = request_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_request_id);
        Self {
            content: content.into(),
            request_id,
        }
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the request id.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

/// The result of a full pipeline run.
///
/// Either `success` is true and `processed_content` is non-empty, or
/// `success` is false and `error_message` is set. Use [`Self::success`] and
/// [`Self::failure`] to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResponse {
    /// Echo of the request id.
    pub request_id: String,
    /// Final stage output; empty on failure.
    pub processed_content: String,
    /// Summarizer output; empty on failure.
    pub summary: String,
    /// Wall-clock duration of the run.
    pub processing_time_ms: f64,
    /// Whether the run succeeded.
    pub success: bool,
    /// Failure description, set iff `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Failure classification, set iff `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// When the response was produced.
    pub timestamp: DateTime<Utc>,
}

impl ProcessingResponse {
    /// Creates a success response.
    #[must_use]
    pub fn success(
        request_id: impl Into<String>,
        processed_content: impl Into<String>,
        summary: impl Into<String>,
        processing_time_ms: f64,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            processed_content: processed_content.into(),
            summary: summary.into(),
            processing_time_ms,
            success: true,
            error_message: None,
            error_kind: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a failure response with empty content fields.
    #[must_use]
    pub fn failure(
        request_id: impl Into<String>,
        processing_time_ms: f64,
        kind: ErrorKind,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            processed_content: String::new(),
            summary: String::new(),
            processing_time_ms,
            success: false,
            error_message: Some(error_message.into()),
            error_kind: Some(kind),
            timestamp: Utc::now(),
        }
    }

    /// Returns true if the run succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }
}

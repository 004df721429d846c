//! Log sink system for checkpoint and instrumentation messages.
//!
//! Every component that reports progress writes [`LogEvent`]s to an injected
//! [`LogSink`]. The default sink forwards to `tracing`; tests use the
//! collecting sink to assert on the exact ordered trail of a run.

mod sink;

pub use sink::{CollectingLogSink, LogSink, NoOpLogSink, TracingLogSink};

#[cfg(test)]
pub use sink::MockLogSink;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag used by the pipeline executor for its checkpoints.
pub const LOAD_BALANCER_TAG: &str = "load_balancer";

/// Tag used by the orchestrator for start/end markers.
pub const ORCHESTRATOR_TAG: &str = "orchestrator";

/// Severity of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose diagnostics.
    Debug,
    /// Normal progress.
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What produced a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    /// A transition between pipeline stages.
    Checkpoint,
    /// Per-stage timing emitted by the instrumentation wrapper.
    Timing,
    /// Orchestrator start/end/failure markers.
    Lifecycle,
}

/// A single entry written to a [`LogSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Severity.
    pub level: LogLevel,
    /// Producer category.
    pub category: LogCategory,
    /// Stage or component tag.
    pub tag: String,
    /// Message text.
    pub message: String,
    /// When the event was created.
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(
        level: LogLevel,
        category: LogCategory,
        tag: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            category,
            tag: tag.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates an info-level checkpoint.
    #[must_use]
    pub fn checkpoint(tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, LogCategory::Checkpoint, tag, message)
    }

    /// Creates a timing event.
    #[must_use]
    pub fn timing(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(level, LogCategory::Timing, tag, message)
    }

    /// Creates a lifecycle event.
    #[must_use]
    pub fn lifecycle(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(level, LogCategory::Lifecycle, tag, message)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.tag.to_uppercase(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_event() {
        let event = LogEvent::checkpoint("logger", "Data parsed successfully for request r1");
        assert_eq!(event.level, LogLevel::Info);
        assert_eq!(event.category, LogCategory::Checkpoint);
        assert_eq!(
            event.to_string(),
            "[LOGGER] Data parsed successfully for request r1"
        );
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error > LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }
}

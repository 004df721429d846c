//! Interceptor that reports stage timing to the log sink.

use super::Interceptor;
use crate::errors::StageError;
use crate::events::{LogEvent, LogLevel, LogSink};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Emits "Processed in" / "Error after" lines tagged with the stage name.
pub struct LoggingInterceptor {
    sink: Arc<dyn LogSink>,
}

impl LoggingInterceptor {
    /// Creates a logging interceptor writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl Interceptor for LoggingInterceptor {
    fn priority(&self) -> i32 {
        -10
    }

    async fn after(&self, stage: &str, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.sink.record(LogEvent::timing(
            LogLevel::Info,
            stage,
            format!("Processed in {ms:.2}ms"),
        ));
    }

    async fn on_error(&self, stage: &str, elapsed: Duration, error: &StageError) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.sink.record(LogEvent::timing(
            LogLevel::Error,
            stage,
            format!("Error after {ms:.2}ms: {error}"),
        ));
    }
}

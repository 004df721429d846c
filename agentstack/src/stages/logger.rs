//! Logger stage: forwards checkpoint messages to the sink.

use super::Stage;
use crate::core::StageKind;
use crate::errors::StageError;
use crate::events::{LogEvent, LogSink};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Emits its input as a checkpoint tagged with the stage name.
#[derive(Clone)]
pub struct LoggerStage {
    sink: Arc<dyn LogSink>,
}

impl LoggerStage {
    /// Creates a logger stage writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl fmt::Debug for LoggerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerStage").finish_non_exhaustive()
    }
}

#[async_trait]
impl Stage for LoggerStage {
    type Input = String;
    type Output = ();

    fn kind(&self) -> StageKind {
        StageKind::Logger
    }

    async fn transform(&self, input: String) -> Result<(), StageError> {
        self.sink.record(LogEvent::checkpoint(self.name(), input));
        Ok(())
    }
}

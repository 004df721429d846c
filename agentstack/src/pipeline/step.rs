//! The ordered steps of a pipeline run.

use crate::core::StageKind;
use std::fmt;

/// One of the six steps every run goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    /// Raw text to record.
    Parse,
    /// Checkpoint after parsing.
    LogParsed,
    /// Record to summary.
    Summarize,
    /// Checkpoint after summarizing.
    LogSummarized,
    /// Summary to final content.
    Optimize,
    /// Checkpoint after optimizing.
    LogCompleted,
}

impl PipelineStep {
    /// Every step, in execution order.
    pub const ORDER: [Self; 6] = [
        Self::Parse,
        Self::LogParsed,
        Self::Summarize,
        Self::LogSummarized,
        Self::Optimize,
        Self::LogCompleted,
    ];

    /// Returns the kind of stage that runs this step.
    #[must_use]
    pub const fn kind(self) -> StageKind {
        match self {
            Self::Parse => StageKind::Parser,
            Self::Summarize => StageKind::Summarizer,
            Self::Optimize => StageKind::Optimizer,
            Self::LogParsed | Self::LogSummarized | Self::LogCompleted => StageKind::Logger,
        }
    }

    /// Returns the checkpoint message for this step.
    ///
    /// Content-transform steps announce their start; logger steps confirm
    /// completion of the step before them.
    #[must_use]
    pub fn checkpoint(self, request_id: &str) -> String {
        match self {
            Self::Parse => format!("Starting data parsing for request {request_id}"),
            Self::LogParsed => format!("Data parsed successfully for request {request_id}"),
            Self::Summarize => format!("Starting summarization for request {request_id}"),
            Self::LogSummarized => format!("Content summarized for request {request_id}"),
            Self::Optimize => format!("Starting optimization for request {request_id}"),
            Self::LogCompleted => format!("Processing completed for request {request_id}"),
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse"),
            Self::LogParsed => write!(f, "log_parsed"),
            Self::Summarize => write!(f, "summarize"),
            Self::LogSummarized => write!(f, "log_summarized"),
            Self::Optimize => write!(f, "optimize"),
            Self::LogCompleted => write!(f, "log_completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_alternates_transform_and_logger() {
        let kinds: Vec<StageKind> = PipelineStep::ORDER.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                StageKind::Parser,
                StageKind::Logger,
                StageKind::Summarizer,
                StageKind::Logger,
                StageKind::Optimizer,
                StageKind::Logger,
            ]
        );
    }

    #[test]
    fn test_checkpoint_mentions_request() {
        for step in PipelineStep::ORDER {
            assert!(step.checkpoint("req-7").ends_with("for request req-7"));
        }
    }
}

//! Stage factory.

use crate::config::Settings;
use crate::events::LogSink;
use crate::stages::{LoggerStage, OptimizerStage, ParserStage, SummarizerStage};
use std::sync::Arc;

/// The stage instances of one pipeline, one named field per step.
#[derive(Debug, Clone)]
pub struct StageSet {
    /// Runs [`PipelineStep::Parse`](super::PipelineStep::Parse).
    pub parser: ParserStage,
    /// Runs [`PipelineStep::LogParsed`](super::PipelineStep::LogParsed).
    pub parse_logger: LoggerStage,
    /// Runs [`PipelineStep::Summarize`](super::PipelineStep::Summarize).
    pub summarizer: SummarizerStage,
    /// Runs [`PipelineStep::LogSummarized`](super::PipelineStep::LogSummarized).
    pub summarize_logger: LoggerStage,
    /// Runs [`PipelineStep::Optimize`](super::PipelineStep::Optimize).
    pub optimizer: OptimizerStage,
    /// Runs [`PipelineStep::LogCompleted`](super::PipelineStep::LogCompleted).
    pub final_logger: LoggerStage,
}

/// Builds the canonical stage set from settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageFactory;

impl StageFactory {
    /// Creates the stages for a pipeline; the loggers write to `sink`.
    #[must_use]
    pub fn create(settings: &Settings, sink: Arc<dyn LogSink>) -> StageSet {
        let logger = LoggerStage::new(sink);
        StageSet {
            parser: ParserStage::new(settings.max_input_size),
            parse_logger: logger.clone(),
            summarizer: SummarizerStage::new(settings.max_summary_length),
            summarize_logger: logger.clone(),
            optimizer: OptimizerStage::new(settings.enable_optimization),
            final_logger: logger,
        }
    }
}

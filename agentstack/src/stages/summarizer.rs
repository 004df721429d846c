//! Summarizer stage.

use super::Stage;
use crate::core::{ParsedRecord, StageKind};
use crate::errors::StageError;
use async_trait::async_trait;

const ELLIPSIS: &str = "...";

/// Condenses a [`ParsedRecord`] into a short summary.
///
/// Content of at most `max_summary_length` words passes through unchanged.
/// Longer content is cut to its first sentence, itself capped at
/// `max_summary_length` characters.
#[derive(Debug, Clone)]
pub struct SummarizerStage {
    max_summary_length: usize,
}

impl SummarizerStage {
    /// Creates a summarizer with the given length limit.
    #[must_use]
    pub fn new(max_summary_length: usize) -> Self {
        Self { max_summary_length }
    }

    /// Summarizes `content`. Deterministic for a given limit.
    #[must_use]
    pub fn summarize(&self, content: &str) -> String {
        let max = self.max_summary_length;
        if content.is_empty() || content.split_whitespace().count() <= max {
            return content.to_string();
        }

        // Leading terminators would otherwise yield an empty first sentence.
        let sentence = content
            .contains('.')
            .then(|| content.split('.').map(str::trim).find(|s| !s.is_empty()))
            .flatten();

        let Some(sentence) = sentence else {
            return content.trim_start().chars().take(max).collect();
        };

        if sentence.chars().count() > max {
            let mut truncated: String = sentence
                .chars()
                .take(max.saturating_sub(ELLIPSIS.len()))
                .collect();
            truncated.push_str(ELLIPSIS);
            truncated
        } else {
            sentence.to_string()
        }
    }
}

#[async_trait]
impl Stage for SummarizerStage {
    type Input = ParsedRecord;
    type Output = String;

    fn kind(&self) -> StageKind {
        StageKind::Summarizer
    }

    async fn transform(&self, input: ParsedRecord) -> Result<String, StageError> {
        Ok(self.summarize(&input.content))
    }
}

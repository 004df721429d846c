//! Parser stage: raw text to [`ParsedRecord`].

use super::Stage;
use crate::core::{ParsedRecord, StageKind};
use crate::errors::StageError;
use async_trait::async_trait;

/// Turns raw content into a [`ParsedRecord`], enforcing the size limit.
#[derive(Debug, Clone)]
pub struct ParserStage {
    max_input_size: usize,
}

impl ParserStage {
    /// Creates a parser accepting at most `max_input_size` characters.
    #[must_use]
    pub fn new(max_input_size: usize) -> Self {
        Self { max_input_size }
    }

    /// Returns the configured limit.
    #[must_use]
    pub fn max_input_size(&self) -> usize {
        self.max_input_size
    }
}

#[async_trait]
impl Stage for ParserStage {
    type Input = String;
    type Output = ParsedRecord;

    fn kind(&self) -> StageKind {
        StageKind::Parser
    }

    async fn transform(&self, input: String) -> Result<ParsedRecord, StageError> {
        let length = input.chars().count();
        if length > self.max_input_size {
            return Err(StageError::InputTooLarge {
                length,
                max: self.max_input_size,
            });
        }
        Ok(ParsedRecord::new(input, self.max_input_size))
    }
}

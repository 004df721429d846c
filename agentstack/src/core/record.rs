//! The intermediate record produced by the parser stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version string stamped into every parsed record.
pub const PARSER_VERSION: &str = "2.0.0";

/// Parser versioning and limits recorded alongside parsed content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserMetadata {
    /// Version of the parser that produced the record.
    pub parser_version: String,
    /// Maximum content length the parser accepted.
    pub max_length: usize,
}

/// Structured view of raw content, consumed by the summarizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// Fresh identifier for this record.
    pub id: Uuid,
    /// The original content.
    pub content: String,
    /// Content length in characters.
    pub length: usize,
    /// Number of whitespace-delimited words.
    pub word_count: usize,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
    /// Parser metadata.
    pub metadata: ParserMetadata,
}

impl ParsedRecord {
    /// Builds a record for `content`, computing length and word count.
    #[must_use]
    pub fn new(content: impl Into<String>, max_length: usize) -> Self {
        let content = content.into();
        Self {
            id: Uuid::new_v4(),
            length: content.chars().count(),
            word_count: content.split_whitespace().count(),
            timestamp: Utc::now(),
            metadata: ParserMetadata {
                parser_version: PARSER_VERSION.to_string(),
                max_length,
            },
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let record = ParsedRecord::new("Test content", 100);
        assert_eq!(record.length, 12);
        assert_eq!(record.word_count, 2);
        assert_eq!(record.metadata.parser_version, PARSER_VERSION);
        assert_eq!(record.metadata.max_length, 100);
    }

    #[test]
    fn test_record_length_counts_characters() {
        let record = ParsedRecord::new("héllo wörld", 100);
        assert_eq!(record.length, 11);
        assert_eq!(record.word_count, 2);
    }

    #[test]
    fn test_records_get_distinct_ids() {
        let a = ParsedRecord::new("same", 10);
        let b = ParsedRecord::new("same", 10);
        assert_ne!(a.id, b.id);
    }
}

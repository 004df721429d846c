//! Stage kind enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of work a stage performs.
///
/// The string form is the stable identifier used as a log tag and as the
/// metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    /// Turns raw text into a [`ParsedRecord`](super::ParsedRecord).
    #[serde(rename = "data_parser")]
    Parser,
    /// Condenses a record into a summary.
    #[serde(rename = "summarizer")]
    Summarizer,
    /// Normalizes whitespace and punctuation.
    #[serde(rename = "optimizer")]
    Optimizer,
    /// Emits checkpoint messages.
    #[serde(rename = "logger")]
    Logger,
}

impl StageKind {
    /// All stage kinds, in pipeline order of first appearance.
    pub const ALL: [Self; 4] = [Self::Parser, Self::Summarizer, Self::Optimizer, Self::Logger];

    /// Returns the stable identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Parser => "data_parser",
            Self::Summarizer => "summarizer",
            Self::Optimizer => "optimizer",
            Self::Logger => "logger",
        }
    }

    /// Returns true for the stages that transform content.
    #[must_use]
    pub const fn is_content_transform(&self) -> bool {
        !matches!(self, Self::Logger)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_display() {
        assert_eq!(StageKind::Parser.to_string(), "data_parser");
        assert_eq!(StageKind::Summarizer.to_string(), "summarizer");
        assert_eq!(StageKind::Optimizer.to_string(), "optimizer");
        assert_eq!(StageKind::Logger.to_string(), "logger");
    }

    #[test]
    fn test_stage_kind_serialize() {
        let json = serde_json::to_string(&StageKind::Parser).unwrap();
        assert_eq!(json, r#""data_parser""#);

        let deserialized: StageKind = serde_json::from_str(r#""optimizer""#).unwrap();
        assert_eq!(deserialized, StageKind::Optimizer);
    }

    #[test]
    fn test_content_transform_kinds() {
        let transforms: Vec<_> = StageKind::ALL
            .iter()
            .filter(|k| k.is_content_transform())
            .collect();
        assert_eq!(transforms.len(), 3);
        assert!(!StageKind::Logger.is_content_transform());
    }
}

//! Optimizer stage.

use super::Stage;
use crate::core::StageKind;
use crate::errors::StageError;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Normalizes whitespace and terminal punctuation.
///
/// When disabled the stage is an identity transform, still instrumented.
#[derive(Debug, Clone)]
pub struct OptimizerStage {
    enabled: bool,
}

impl OptimizerStage {
    /// Creates an optimizer.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns whether the stage rewrites content.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Optimizes `content`. Applying it twice gives the same result as once.
    #[must_use]
    pub fn optimize(&self, content: &str) -> String {
        if !self.enabled {
            return content.to_string();
        }

        let mut optimized = WHITESPACE_RUN.replace_all(content, " ").trim().to_string();
        if !optimized.is_empty() && !optimized.ends_with(['.', '!', '?']) {
            optimized.push('.');
        }
        optimized
    }
}

#[async_trait]
impl Stage for OptimizerStage {
    type Input = String;
    type Output = String;

    fn kind(&self) -> StageKind {
        StageKind::Optimizer
    }

    async fn transform(&self, input: String) -> Result<String, StageError> {
        Ok(self.optimize(&input))
    }
}

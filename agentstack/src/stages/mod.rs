//! Stage trait and implementations.
//!
//! A stage is one step of the fixed processing sequence. Concrete stages
//! implement only [`Stage::transform`]; timing and the interceptor hooks are
//! applied once, by [`instrument`], whenever a stage is driven through
//! [`Stage::process`].

mod logger;
mod optimizer;
mod parser;
mod summarizer;

pub use logger::LoggerStage;
pub use optimizer::OptimizerStage;
pub use parser::ParserStage;
pub use summarizer::SummarizerStage;

use crate::core::StageKind;
use crate::errors::StageError;
use crate::interceptors::InterceptorChain;
use async_trait::async_trait;
use std::fmt::Debug;
use std::future::Future;
use std::time::Instant;

/// Trait for pipeline stages.
///
/// Input and output types differ per position in the pipeline, so a
/// mismatched sequence is rejected at compile time. Stages hold read-only
/// configuration and no per-request state.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// What the stage consumes.
    type Input: Send + 'static;
    /// What the stage produces.
    type Output: Send + 'static;

    /// Returns the kind of the stage.
    fn kind(&self) -> StageKind;

    /// Returns the label used for logs and metrics.
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Performs the stage-specific transformation, without instrumentation.
    async fn transform(&self, input: Self::Input) -> Result<Self::Output, StageError>;

    /// Runs the transformation wrapped by [`instrument`].
    async fn process(
        &self,
        input: Self::Input,
        chain: &InterceptorChain,
    ) -> Result<Self::Output, StageError> {
        instrument(self.name(), chain, self.transform(input)).await
    }
}

/// Runs `work` as the stage named `stage`, timing it and notifying `chain`.
///
/// On failure every interceptor sees the error before it is returned
/// unchanged; the wrapper never swallows a failure.
pub async fn instrument<T, F>(
    stage: &str,
    chain: &InterceptorChain,
    work: F,
) -> Result<T, StageError>
where
    F: Future<Output = Result<T, StageError>> + Send,
{
    chain.run_before(stage).await;
    let start = Instant::now();

    match work.await {
        Ok(output) => {
            let elapsed = start.elapsed();
            chain.run_after(stage, elapsed).await;
            Ok(output)
        }
        Err(err) => {
            let elapsed = start.elapsed();
            chain.run_on_error(stage, elapsed, &err).await;
            Err(err)
        }
    }
}

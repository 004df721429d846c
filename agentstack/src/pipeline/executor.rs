//! Pipeline executor.
//!
//! The executor drives the six steps of [`PipelineStep::ORDER`] strictly in
//! sequence, threading each output into the next transform. A stage failure
//! stops the run and is turned into a failure response; nothing is retried.

use super::{PipelineStep, StageSet};
use crate::core::{ProcessingRequest, ProcessingResponse};
use crate::errors::{AgentStackError, ErrorKind, Result, StageError};
use crate::events::{LogEvent, LogSink, LOAD_BALANCER_TAG};
use crate::interceptors::InterceptorChain;
use crate::stages::Stage;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

/// Outputs a completed run hands back.
struct RunOutput {
    summary: String,
    processed: String,
}

/// Spawned step sequence that is aborted when its owner goes away.
///
/// Dropping the `distribute` future drops this guard, so a run abandoned by
/// its caller stops at the next await point instead of running unobserved.
struct RunTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> RunTask<T> {
    fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    fn abort(&self) {
        self.handle.abort();
    }
}

impl<T> Future for RunTask<T> {
    type Output = std::result::Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx)
    }
}

impl<T> Drop for RunTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs one request through the stage sequence.
#[derive(Clone)]
pub struct PipelineExecutor {
    stages: Arc<StageSet>,
    chain: Arc<InterceptorChain>,
    sink: Arc<dyn LogSink>,
    timeout: Option<Duration>,
}

/// Name the pipeline executor is known by in logs.
pub type LoadBalancer = PipelineExecutor;

impl PipelineExecutor {
    /// Creates an executor without a deadline.
    #[must_use]
    pub fn new(stages: StageSet, chain: InterceptorChain, sink: Arc<dyn LogSink>) -> Self {
        Self {
            stages: Arc::new(stages),
            chain: Arc::new(chain),
            sink,
            timeout: None,
        }
    }

    /// Sets the per-run deadline. `None` disables it.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the per-run deadline.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Processes `request` and returns the response.
    ///
    /// Stage failures and deadline expiry come back as failure responses.
    /// Only a failure outside the stage boundary, such as a panic in the run
    /// task, is returned as an error.
    pub async fn distribute(&self, request: &ProcessingRequest) -> Result<ProcessingResponse> {
        let start = Instant::now();
        let request_id = request.request_id().to_string();

        let mut task = RunTask::spawn(run_steps(
            Arc::clone(&self.stages),
            Arc::clone(&self.chain),
            Arc::clone(&self.sink),
            request_id.clone(),
            request.content().to_string(),
        ));

        let joined = match self.timeout {
            Some(limit) => {
                if let Ok(joined) = tokio::time::timeout(limit, &mut task).await {
                    joined
                } else {
                    task.abort();
                    // Wait for the cancelled task so no stage call outlives the run.
                    let _ = (&mut task).await;
                    let message = format!("Request timed out after {}s", limit.as_secs());
                    self.checkpoint(format!("Processing failed for request {request_id}: {message}"));
                    warn!(request_id = %request_id, timeout_ms = limit.as_millis() as u64, "Run timed out");
                    return Ok(ProcessingResponse::failure(
                        request_id,
                        elapsed_ms(start),
                        ErrorKind::Timeout,
                        message,
                    ));
                }
            }
            None => (&mut task).await,
        };

        let outcome = joined.map_err(|e| {
            AgentStackError::Unexpected(format!("run task for request {request_id} failed: {e}"))
        })?;
        let processing_time_ms = elapsed_ms(start);

        match outcome {
            Ok(output) => {
                debug!(request_id = %request_id, duration_ms = processing_time_ms, "Run completed");
                Ok(ProcessingResponse::success(
                    request_id,
                    output.processed,
                    output.summary,
                    processing_time_ms,
                ))
            }
            Err(err) => {
                self.checkpoint(format!("Processing failed for request {request_id}: {err}"));
                warn!(request_id = %request_id, error = %err, "Run failed");
                Ok(ProcessingResponse::failure(
                    request_id,
                    processing_time_ms,
                    err.kind(),
                    err.to_string(),
                ))
            }
        }
    }

    fn checkpoint(&self, message: String) {
        self.sink.record(LogEvent::checkpoint(LOAD_BALANCER_TAG, message));
    }
}

impl fmt::Debug for PipelineExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineExecutor")
            .field("stages", &self.stages)
            .field("chain", &self.chain)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

async fn run_steps(
    stages: Arc<StageSet>,
    chain: Arc<InterceptorChain>,
    sink: Arc<dyn LogSink>,
    request_id: String,
    content: String,
) -> std::result::Result<RunOutput, StageError> {
    let announce = |step: PipelineStep| {
        sink.record(LogEvent::checkpoint(LOAD_BALANCER_TAG, step.checkpoint(&request_id)));
    };

    announce(PipelineStep::Parse);
    let record = stages.parser.process(content, &chain).await?;
    stages
        .parse_logger
        .process(PipelineStep::LogParsed.checkpoint(&request_id), &chain)
        .await?;

    announce(PipelineStep::Summarize);
    let summary = stages.summarizer.process(record, &chain).await?;
    stages
        .summarize_logger
        .process(PipelineStep::LogSummarized.checkpoint(&request_id), &chain)
        .await?;

    announce(PipelineStep::Optimize);
    let processed = stages.optimizer.process(summary.clone(), &chain).await?;
    if processed.is_empty() {
        return Err(StageError::EmptyOutput);
    }
    stages
        .final_logger
        .process(PipelineStep::LogCompleted.checkpoint(&request_id), &chain)
        .await?;

    Ok(RunOutput { summary, processed })
}

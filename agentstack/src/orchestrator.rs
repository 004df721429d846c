//! Public entry point of the pipeline.
//!
//! [`Orchestrator::run`] validates the content, wraps it in a
//! [`ProcessingRequest`] and hands it to the [`PipelineExecutor`]. Validation
//! failures and failures outside the stage boundary are returned as errors;
//! everything that goes wrong inside the pipeline comes back as a failure
//! response.

use crate::config::Settings;
use crate::core::{ProcessingRequest, ProcessingResponse};
use crate::errors::{AgentStackError, Result};
use crate::events::{LogEvent, LogLevel, LogSink, TracingLogSink, ORCHESTRATOR_TAG};
use crate::interceptors::{Interceptor, InterceptorChain, LoggingInterceptor, MonitoringInterceptor};
use crate::monitoring::{HealthSnapshot, MetricsCollector};
use crate::pipeline::{PipelineExecutor, StageFactory};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info};

/// Builder for [`Orchestrator`].
pub struct OrchestratorBuilder {
    settings: Settings,
    sink: Option<Arc<dyn LogSink>>,
    metrics: Option<Arc<MetricsCollector>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl OrchestratorBuilder {
    /// Sets the log sink. Defaults to [`TracingLogSink`].
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Shares an existing metrics collector.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Adds an interceptor around every stage call.
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Validates the settings and builds the orchestrator.
    pub fn build(self) -> Result<Orchestrator> {
        self.settings.validate()?;

        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingLogSink));
        let metrics = self.metrics.unwrap_or_default();

        let mut chain =
            InterceptorChain::new().with(Arc::new(LoggingInterceptor::new(Arc::clone(&sink))));
        if self.settings.enable_metrics {
            chain.add(Arc::new(MonitoringInterceptor::new(Arc::clone(&metrics))));
        }
        for interceptor in self.interceptors {
            chain.add(interceptor);
        }

        let stages = StageFactory::create(&self.settings, Arc::clone(&sink));
        let executor = PipelineExecutor::new(stages, chain, Arc::clone(&sink))
            .with_timeout(self.settings.request_timeout());
        let permits = Arc::new(Semaphore::new(self.settings.max_concurrent_agents));

        Ok(Orchestrator {
            settings: Arc::new(self.settings),
            executor,
            metrics,
            sink,
            permits,
        })
    }
}

/// Coordinates validation, execution and lifecycle logging of runs.
///
/// Holds no per-request state; one instance serves any number of concurrent
/// runs, at most `max_concurrent_agents` of them executing at once.
pub struct Orchestrator {
    settings: Arc<Settings>,
    executor: PipelineExecutor,
    metrics: Arc<MetricsCollector>,
    sink: Arc<dyn LogSink>,
    permits: Arc<Semaphore>,
}

impl Orchestrator {
    /// Creates an orchestrator with the default sink and a fresh collector.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::builder(settings).build()
    }

    /// Starts building an orchestrator.
    #[must_use]
    pub fn builder(settings: Settings) -> OrchestratorBuilder {
        OrchestratorBuilder {
            settings,
            sink: None,
            metrics: None,
            interceptors: Vec::new(),
        }
    }

    /// Processes `content` through the pipeline.
    ///
    /// A missing or empty `request_id` gets a generated one. Returns
    /// [`AgentStackError::InvalidContent`] before anything runs when
    /// validation is enabled and the content is blank.
    pub async fn run(&self, content: &str, request_id: Option<String>) -> Result<ProcessingResponse> {
        if self.settings.enable_input_validation && content.trim().is_empty() {
            return Err(AgentStackError::invalid_content());
        }

        let request = ProcessingRequest::new(content, request_id);
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AgentStackError::Unexpected(e.to_string()))?;

        self.lifecycle(
            LogLevel::Info,
            format!("Starting orchestration for request {}", request.request_id()),
        );

        match self.executor.distribute(&request).await {
            Ok(response) => {
                self.lifecycle(
                    LogLevel::Info,
                    format!("Orchestration completed for request {}", request.request_id()),
                );
                info!(
                    request_id = %response.request_id,
                    success = response.success,
                    duration_ms = response.processing_time_ms,
                    "Request processed"
                );
                Ok(response)
            }
            Err(err) => {
                self.lifecycle(LogLevel::Error, format!("Orchestration failed: {err}"));
                error!(request_id = %request.request_id(), error = %err, "Orchestration failed");
                Err(err)
            }
        }
    }

    /// Runs the pipeline to completion on a private runtime.
    ///
    /// Returns the processed content, or an empty string when the run ends
    /// in a failure response. Must not be called from inside an async
    /// context.
    pub fn run_blocking(&self, content: &str) -> Result<String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let response = runtime.block_on(self.run(content, None))?;
        Ok(if response.success {
            response.processed_content
        } else {
            String::new()
        })
    }

    /// Returns the current health snapshot.
    #[must_use]
    pub fn health(&self) -> HealthSnapshot {
        self.metrics.health_snapshot(&self.settings.app_version)
    }

    /// Renders collected metrics for external scrapers.
    pub fn metrics_text(&self) -> Result<String> {
        if !self.settings.enable_metrics {
            return Err(AgentStackError::Config("metrics are disabled".to_string()));
        }
        Ok(self.metrics.render_prometheus())
    }

    /// Returns the settings this orchestrator was built with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the shared metrics collector.
    #[must_use]
    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    fn lifecycle(&self, level: LogLevel, message: String) {
        self.sink.record(LogEvent::lifecycle(level, ORCHESTRATOR_TAG, message));
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("settings", &self.settings)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

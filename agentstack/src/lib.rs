//! # Agentstack
//!
//! A content-processing pipeline that parses, summarizes and optimizes text
//! through a fixed sequence of instrumented stages.
//!
//! Agentstack provides:
//!
//! - **Typed stages**: each stage declares its input and output types, so the
//!   six-step sequence is checked at compile time
//! - **Single instrumentation point**: timing, logging and metrics hooks run
//!   around every stage call through one wrapper
//! - **Failures as data**: anything that goes wrong inside the pipeline comes
//!   back as a failure response, not as an error
//! - **Metrics and health**: per-stage counters, a health snapshot and a text
//!   exposition for scrapers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agentstack::prelude::*;
//!
//! # async fn example() -> agentstack::Result<()> {
//! let orchestrator = Orchestrator::new(Settings::default())?;
//! let response = orchestrator.run("Hello   world.\n\n", None).await?;
//! assert_eq!(response.processed_content, "Hello world.");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod interceptors;
pub mod monitoring;
pub mod observability;
pub mod orchestrator;
pub mod pipeline;
pub mod stages;
pub mod utils;

pub use config::Settings;
pub use errors::{AgentStackError, Result};
pub use orchestrator::Orchestrator;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{LogFormat, Settings};
    pub use crate::core::{ParsedRecord, ProcessingRequest, ProcessingResponse, StageKind};
    pub use crate::errors::{AgentStackError, ErrorKind, StageError};
    pub use crate::events::{CollectingLogSink, LogEvent, LogSink, NoOpLogSink, TracingLogSink};
    pub use crate::interceptors::{Interceptor, InterceptorChain};
    pub use crate::monitoring::{monitor, AgentMetrics, HealthSnapshot, MetricsCollector};
    pub use crate::orchestrator::{Orchestrator, OrchestratorBuilder};
    pub use crate::pipeline::{LoadBalancer, PipelineExecutor, PipelineStep, StageFactory, StageSet};
    pub use crate::stages::{LoggerStage, OptimizerStage, ParserStage, Stage, SummarizerStage};
    pub use crate::utils::generate_request_id;
}

//! Pipeline construction and execution.
//!
//! This module provides:
//! - The fixed six-step sequence ([`PipelineStep`])
//! - The stage factory producing a typed [`StageSet`]
//! - The executor that drives one request through the sequence

mod executor;
mod factory;
mod step;

#[cfg(test)]
mod integration_tests;

pub use executor::{LoadBalancer, PipelineExecutor};
pub use factory::{StageFactory, StageSet};
pub use step::PipelineStep;

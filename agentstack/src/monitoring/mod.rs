//! Metrics collection, health snapshots and exposition.
//!
//! The [`MetricsCollector`] is constructed explicitly and shared by `Arc`
//! with whoever records into it. It observes stage calls but never feeds
//! back into pipeline control flow.

mod collector;
mod exposition;
mod health;
mod resources;

pub use collector::{monitor, AgentMetrics, MetricsCollector};
pub use health::HealthSnapshot;
pub use resources::ResourceUsage;

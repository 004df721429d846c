//! Health snapshot type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time health of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Always "healthy" while the process can answer.
    pub status: String,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Application version.
    pub version: String,
    /// Seconds since the collector was created.
    pub uptime_seconds: f64,
    /// Resident memory in MiB.
    pub memory_usage_mb: f64,
    /// Average CPU usage of the process since it started.
    pub cpu_usage_percent: f64,
    /// Number of stages that processed at least one call.
    pub active_agents: usize,
}

//! Per-stage counters.

use super::health::HealthSnapshot;
use super::resources::ResourceUsage;
use crate::core::StageKind;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Cumulative counters for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// Stage name.
    pub agent_name: String,
    /// Number of recorded calls.
    pub requests_processed: u64,
    /// Sum of call durations in seconds.
    pub total_processing_time: f64,
    /// `total_processing_time / requests_processed`.
    pub average_processing_time: f64,
    /// Number of failed calls.
    pub error_count: u64,
    /// When the last call was recorded.
    pub last_processed: Option<DateTime<Utc>>,
}

impl AgentMetrics {
    /// Creates zeroed counters for `agent_name`.
    #[must_use]
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            requests_processed: 0,
            total_processing_time: 0.0,
            average_processing_time: 0.0,
            error_count: 0,
            last_processed: None,
        }
    }

    /// Returns the number of successful calls.
    #[must_use]
    pub fn success_count(&self) -> u64 {
        self.requests_processed.saturating_sub(self.error_count)
    }

    fn record(&mut self, duration_seconds: f64, success: bool) {
        self.requests_processed += 1;
        self.total_processing_time += duration_seconds;
        self.average_processing_time =
            self.total_processing_time / self.requests_processed as f64;
        self.last_processed = Some(Utc::now());
        if !success {
            self.error_count += 1;
        }
    }
}

/// Process-lifetime collector of per-stage metrics.
///
/// Each record mutates a single map entry under its shard lock, so concurrent
/// runs never lose updates.
#[derive(Debug)]
pub struct MetricsCollector {
    started: Instant,
    stages: DashMap<String, AgentMetrics>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Creates a collector with every built-in stage registered.
    #[must_use]
    pub fn new() -> Self {
        let stages = DashMap::new();
        for kind in StageKind::ALL {
            stages.insert(kind.as_str().to_string(), AgentMetrics::new(kind.as_str()));
        }
        Self {
            started: Instant::now(),
            stages,
        }
    }

    /// Records one stage call.
    pub fn record_request(&self, stage_name: &str, duration: Duration, success: bool) {
        self.stages
            .entry(stage_name.to_string())
            .or_insert_with(|| AgentMetrics::new(stage_name))
            .record(duration.as_secs_f64(), success);
    }

    /// Records one call and logs its outcome; `error` is set for failures.
    pub fn observe(&self, stage_name: &str, elapsed: Duration, error: Option<&dyn fmt::Display>) {
        let duration_ms = elapsed.as_secs_f64() * 1000.0;
        self.record_request(stage_name, elapsed, error.is_none());
        match error {
            None => debug!(agent = stage_name, duration_ms, success = true, "Request processed successfully"),
            Some(err) => error!(
                agent = stage_name,
                duration_ms,
                error = %err,
                success = false,
                "Request processing failed"
            ),
        }
    }

    /// Returns a copy of the counters for `stage_name`.
    #[must_use]
    pub fn stage_metrics(&self, stage_name: &str) -> Option<AgentMetrics> {
        self.stages.get(stage_name).map(|m| m.value().clone())
    }

    /// Returns a copy of all counters, sorted by stage name.
    #[must_use]
    pub fn snapshot(&self) -> Vec<AgentMetrics> {
        let mut all: Vec<AgentMetrics> = self.stages.iter().map(|m| m.value().clone()).collect();
        all.sort_by(|a, b| a.agent_name.cmp(&b.agent_name));
        all
    }

    /// Returns the number of stages that processed at least one call.
    #[must_use]
    pub fn active_agents(&self) -> usize {
        self.stages
            .iter()
            .filter(|m| m.value().requests_processed > 0)
            .count()
    }

    /// Returns time since the collector was created.
    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Builds a health snapshot, sampling host resource usage.
    #[must_use]
    pub fn health_snapshot(&self, version: &str) -> HealthSnapshot {
        let usage = ResourceUsage::sample();
        HealthSnapshot {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            version: version.to_string(),
            uptime_seconds: self.uptime().as_secs_f64(),
            memory_usage_mb: usage.memory_mb(),
            cpu_usage_percent: usage.cpu_percent,
            active_agents: self.active_agents(),
        }
    }
}

/// Runs `work`, recording its duration and outcome under `stage_name`.
///
/// The work's error is returned unchanged after it has been recorded.
pub async fn monitor<T, E, F>(collector: &MetricsCollector, stage_name: &str, work: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let start = Instant::now();
    let result = work.await;
    let error = result.as_ref().err().map(|e| e as &dyn fmt::Display);
    collector.observe(stage_name, start.elapsed(), error);
    result
}

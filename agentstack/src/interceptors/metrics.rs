//! Interceptor that feeds stage outcomes into the metrics collector.

use super::Interceptor;
use crate::errors::StageError;
use crate::monitoring::MetricsCollector;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Records every stage call into a shared [`MetricsCollector`].
pub struct MonitoringInterceptor {
    collector: Arc<MetricsCollector>,
}

impl MonitoringInterceptor {
    /// Creates a monitoring interceptor.
    #[must_use]
    pub fn new(collector: Arc<MetricsCollector>) -> Self {
        Self { collector }
    }
}

#[async_trait]
impl Interceptor for MonitoringInterceptor {
    fn priority(&self) -> i32 {
        -20
    }

    async fn after(&self, stage: &str, elapsed: Duration) {
        self.collector.observe(stage, elapsed, None);
    }

    async fn on_error(&self, stage: &str, elapsed: Duration, err: &StageError) {
        self.collector.observe(stage, elapsed, Some(err as &dyn std::fmt::Display));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_success_and_failure() {
        let collector = Arc::new(MetricsCollector::new());
        let interceptor = MonitoringInterceptor::new(Arc::clone(&collector));

        interceptor.after("optimizer", Duration::from_millis(3)).await;
        interceptor
            .on_error(
                "optimizer",
                Duration::from_millis(1),
                &StageError::failed("optimizer", "boom"),
            )
            .await;

        let metrics = collector.stage_metrics("optimizer").unwrap();
        assert_eq!(metrics.requests_processed, 2);
        assert_eq!(metrics.error_count, 1);
    }
}

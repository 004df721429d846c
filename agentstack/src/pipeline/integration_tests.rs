//! End-to-end tests for pipeline runs.

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::core::StageKind;
    use crate::errors::{AgentStackError, ErrorKind, StageError};
    use crate::events::{CollectingLogSink, LogCategory, LogEvent, LogSink};
    use crate::interceptors::Interceptor;
    use crate::monitoring::MetricsCollector;
    use crate::orchestrator::Orchestrator;
    use async_trait::async_trait;
    use futures::future::join_all;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Sleeps before the named stage runs.
    struct SlowInterceptor {
        stage: &'static str,
        delay: Duration,
    }

    #[async_trait]
    impl Interceptor for SlowInterceptor {
        async fn before(&self, stage: &str) {
            if stage == self.stage {
                tokio::time::sleep(self.delay).await;
            }
        }
    }

    /// Panics before the named stage runs.
    struct PanickingInterceptor {
        stage: &'static str,
    }

    #[async_trait]
    impl Interceptor for PanickingInterceptor {
        async fn before(&self, stage: &str) {
            assert_ne!(stage, self.stage, "interceptor blew up");
        }
    }

    /// Counts every completed stage call.
    #[derive(Default)]
    struct CountingInterceptor {
        completed: AtomicUsize,
        failed: AtomicUsize,
    }

    #[async_trait]
    impl Interceptor for CountingInterceptor {
        async fn after(&self, _stage: &str, _elapsed: Duration) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_error(&self, _stage: &str, _elapsed: Duration, _error: &StageError) {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn build(settings: Settings) -> (Orchestrator, Arc<CollectingLogSink>) {
        let sink = Arc::new(CollectingLogSink::new());
        let orchestrator = Orchestrator::builder(settings)
            .with_sink(sink.clone())
            .build()
            .unwrap();
        (orchestrator, sink)
    }

    #[tokio::test]
    async fn test_whitespace_is_collapsed() {
        let (orchestrator, _sink) = build(Settings::new());

        let response = orchestrator.run("Hello   world.\n\n\n", None).await.unwrap();

        assert!(response.success);
        assert_eq!(response.processed_content, "Hello world.");
    }

    #[tokio::test]
    async fn test_empty_input_raises_before_any_stage() {
        let counter = Arc::new(CountingInterceptor::default());
        let sink = Arc::new(CollectingLogSink::new());
        let orchestrator = Orchestrator::builder(Settings::new())
            .with_sink(sink.clone())
            .with_interceptor(counter.clone())
            .build()
            .unwrap();

        let err = orchestrator.run("", None).await.unwrap_err();

        assert!(matches!(err, AgentStackError::InvalidContent(_)));
        assert_eq!(counter.completed.load(Ordering::SeqCst), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_input_fails_with_response() {
        let settings = Settings::new();
        let content = "a".repeat(settings.max_input_size + 1);
        let (orchestrator, sink) = build(settings);

        let response = orchestrator.run(&content, Some("big".to_string())).await.unwrap();

        assert!(!response.success);
        assert_eq!(response.error_kind, Some(ErrorKind::InputTooLarge));
        let message = response.error_message.unwrap();
        assert!(message.contains("Data too large"));
        assert!(message.contains("10000"));
        assert!(response.processed_content.is_empty());
        assert!(response.summary.is_empty());
        assert!(response.processing_time_ms > 0.0);

        // Nothing after the parser ran.
        assert!(sink.events_for_tag(StageKind::Summarizer.as_str()).is_empty());
        assert!(sink.events_for_tag(StageKind::Logger.as_str()).is_empty());
        let parser = orchestrator.metrics().stage_metrics("data_parser").unwrap();
        assert_eq!(parser.error_count, 1);
        let summarizer = orchestrator.metrics().stage_metrics("summarizer").unwrap();
        assert_eq!(summarizer.requests_processed, 0);
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let (orchestrator, _sink) = build(Settings::new());
        let contents: Vec<String> = (0..5).map(|i| format!("Concurrent request number {i}")).collect();

        let responses = join_all(contents.iter().map(|c| orchestrator.run(c, None))).await;

        let mut ids = HashSet::new();
        for (response, content) in responses.into_iter().zip(&contents) {
            let response = response.unwrap();
            assert!(response.success);
            assert_eq!(response.processed_content, format!("{content}."));
            ids.insert(response.request_id);
        }
        assert_eq!(ids.len(), 5);

        let metrics = orchestrator.metrics();
        for kind in StageKind::ALL.iter().filter(|k| k.is_content_transform()) {
            assert_eq!(metrics.stage_metrics(kind.as_str()).unwrap().requests_processed, 5);
        }
        assert_eq!(metrics.stage_metrics("logger").unwrap().requests_processed, 15);
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_collector_across_tasks() {
        let collector = Arc::new(MetricsCollector::new());
        let orchestrator = Arc::new(
            Orchestrator::builder(Settings::new().with_max_concurrent_agents(2))
                .with_sink(Arc::new(CollectingLogSink::new()))
                .with_metrics(Arc::clone(&collector))
                .build()
                .unwrap(),
        );

        let tasks: Vec<_> = (0..10)
            .map(|i| {
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(async move { orchestrator.run(&format!("task {i}"), None).await })
            })
            .collect();
        for task in join_all(tasks).await {
            assert!(task.unwrap().unwrap().success);
        }

        assert_eq!(collector.stage_metrics("optimizer").unwrap().requests_processed, 10);
    }

    #[tokio::test]
    async fn test_disabled_optimization_returns_summary() {
        let (orchestrator, _sink) = build(Settings::new().with_optimization(false));

        let response = orchestrator.run("Hello   world\n", None).await.unwrap();

        assert!(response.success);
        assert_eq!(response.processed_content, response.summary);
        assert_eq!(response.processed_content, "Hello   world\n");
    }

    #[tokio::test]
    async fn test_checkpoint_order() {
        let (orchestrator, sink) = build(Settings::new());

        orchestrator.run("Some content.", Some("ord-1".to_string())).await.unwrap();

        assert_eq!(
            sink.checkpoints_for("ord-1"),
            vec![
                "Starting data parsing for request ord-1",
                "Data parsed successfully for request ord-1",
                "Starting summarization for request ord-1",
                "Content summarized for request ord-1",
                "Starting optimization for request ord-1",
                "Processing completed for request ord-1",
            ]
        );
    }

    #[tokio::test]
    async fn test_stage_timing_lines() {
        let (orchestrator, sink) = build(Settings::new());

        orchestrator.run("Timing check", None).await.unwrap();

        let timing = sink.messages_in(LogCategory::Timing);
        assert_eq!(timing.len(), 6);
        assert!(timing.iter().all(|m| m.starts_with("Processed in ") && m.ends_with("ms")));
    }

    #[tokio::test]
    async fn test_success_properties() {
        let (orchestrator, _sink) = build(Settings::new());
        let long = "Sentence with several words in it. ".repeat(40);
        let inputs = ["x", "Question?", "multi\nline\ttext", long.as_str()];

        for input in inputs {
            let response = orchestrator.run(input, None).await.unwrap();
            assert!(response.success);
            assert!(response.processed_content.ends_with(['.', '!', '?']));
            assert!(response.summary.split_whitespace().count() <= 100);
            assert!(response.processing_time_ms >= 0.0);
        }
    }

    #[tokio::test]
    async fn test_padded_and_terminator_only_content_succeeds() {
        let (orchestrator, _sink) = build(Settings::new());
        let padded = format!("{}{}", " ".repeat(100), "word ".repeat(101));
        let dots = ". ".repeat(101);

        for input in [padded.as_str(), dots.as_str()] {
            let response = orchestrator.run(input, None).await.unwrap();
            assert!(response.success, "failed for {input:?}: {:?}", response.error_message);
            assert!(!response.processed_content.is_empty());
            assert!(response.processed_content.ends_with(['.', '!', '?']));
        }
    }

    #[tokio::test]
    async fn test_dropped_run_cancels_remaining_stages() {
        let counter = Arc::new(CountingInterceptor::default());
        let orchestrator = Orchestrator::builder(Settings::new().with_request_timeout(0))
            .with_sink(Arc::new(CollectingLogSink::new()))
            .with_interceptor(Arc::new(SlowInterceptor {
                stage: "summarizer",
                delay: Duration::from_millis(300),
            }))
            .with_interceptor(counter.clone())
            .build()
            .unwrap();

        let outcome =
            tokio::time::timeout(Duration::from_millis(50), orchestrator.run("Dropped run", None)).await;
        assert!(outcome.is_err());
        let at_drop = counter.completed.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(at_drop, 2);
        assert_eq!(counter.completed.load(Ordering::SeqCst), at_drop);
        assert_eq!(
            orchestrator.metrics().stage_metrics("optimizer").unwrap().requests_processed,
            0
        );
    }

    #[tokio::test]
    async fn test_timeout_produces_failure_response() {
        let sink = Arc::new(CollectingLogSink::new());
        let counter = Arc::new(CountingInterceptor::default());
        let orchestrator = Orchestrator::builder(Settings::new().with_request_timeout(1))
            .with_sink(sink.clone())
            .with_interceptor(Arc::new(SlowInterceptor {
                stage: "summarizer",
                delay: Duration::from_secs(5),
            }))
            .with_interceptor(counter.clone())
            .build()
            .unwrap();

        let response = orchestrator.run("Slow content", Some("slow".to_string())).await.unwrap();

        assert!(!response.success);
        assert_eq!(response.error_kind, Some(ErrorKind::Timeout));
        assert_eq!(response.error_message.as_deref(), Some("Request timed out after 1s"));
        assert!(response.processed_content.is_empty());

        // The aborted run never reaches the optimizer.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.completed.load(Ordering::SeqCst), 2);
        assert!(!sink
            .checkpoints_for("slow")
            .iter()
            .any(|m| m.starts_with("Starting optimization")));
    }

    #[tokio::test]
    async fn test_panic_surfaces_as_unexpected() {
        let sink = Arc::new(CollectingLogSink::new());
        let orchestrator = Orchestrator::builder(Settings::new())
            .with_sink(sink.clone())
            .with_interceptor(Arc::new(PanickingInterceptor { stage: "optimizer" }))
            .build()
            .unwrap();

        let err = orchestrator.run("boom", None).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unexpected);
        let lifecycle = sink.messages_in(LogCategory::Lifecycle);
        assert!(lifecycle.last().unwrap().starts_with("Orchestration failed: "));
    }

    #[tokio::test]
    async fn test_custom_sink_receives_every_event() {
        struct CountingSink(AtomicUsize);

        impl LogSink for CountingSink {
            fn record(&self, _event: LogEvent) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));
        let orchestrator = Orchestrator::builder(Settings::new())
            .with_sink(sink.clone())
            .build()
            .unwrap();

        orchestrator.run("count me", None).await.unwrap();

        // 2 lifecycle + 6 checkpoints + 6 timing lines.
        assert_eq!(sink.0.load(Ordering::SeqCst), 14);
    }
}

//! Interceptor chain for ordered middleware execution.

use crate::errors::StageError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Trait for stage execution interceptors.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Returns the interceptor's priority (lower = earlier execution).
    fn priority(&self) -> i32 {
        0
    }

    /// Called before the stage transformation starts.
    async fn before(&self, _stage: &str) {}

    /// Called after the stage transformation succeeded.
    async fn after(&self, _stage: &str, _elapsed: Duration) {}

    /// Called after the stage transformation failed.
    ///
    /// The error is re-raised to the caller once every interceptor has run.
    async fn on_error(&self, _stage: &str, _elapsed: Duration, _error: &StageError) {}
}

/// A chain of interceptors for stage execution.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Creates a new empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Adds an interceptor to the chain.
    pub fn add(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
        self.interceptors.sort_by_key(|i| i.priority());
    }

    /// Adds an interceptor, builder style.
    #[must_use]
    pub fn with(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.add(interceptor);
        self
    }

    /// Runs every `before` hook in priority order.
    pub async fn run_before(&self, stage: &str) {
        for interceptor in &self.interceptors {
            interceptor.before(stage).await;
        }
    }

    /// Runs every `after` hook in reverse priority order.
    pub async fn run_after(&self, stage: &str, elapsed: Duration) {
        for interceptor in self.interceptors.iter().rev() {
            interceptor.after(stage, elapsed).await;
        }
    }

    /// Runs every `on_error` hook in reverse priority order.
    pub async fn run_on_error(&self, stage: &str, elapsed: Duration, error: &StageError) {
        for interceptor in self.interceptors.iter().rev() {
            interceptor.on_error(stage, elapsed, error).await;
        }
    }

    /// Returns the number of interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Returns true if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct RecordingInterceptor {
        label: &'static str,
        priority: i32,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Interceptor for RecordingInterceptor {
        fn priority(&self) -> i32 {
            self.priority
        }

        async fn before(&self, stage: &str) {
            self.calls.lock().push(format!("{}:before:{stage}", self.label));
        }

        async fn after(&self, stage: &str, _elapsed: Duration) {
            self.calls.lock().push(format!("{}:after:{stage}", self.label));
        }

        async fn on_error(&self, stage: &str, _elapsed: Duration, _error: &StageError) {
            self.calls.lock().push(format!("{}:error:{stage}", self.label));
        }
    }

    fn recording(label: &'static str, priority: i32, calls: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Interceptor> {
        Arc::new(RecordingInterceptor {
            label,
            priority,
            calls: Arc::clone(calls),
        })
    }

    #[tokio::test]
    async fn test_chain_creation() {
        let chain = InterceptorChain::new();
        assert!(chain.is_empty());
    }

    #[tokio::test]
    async fn test_chain_ordering() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new()
            .with(recording("late", 10, &calls))
            .with(recording("early", -5, &calls));

        assert_eq!(chain.len(), 2);

        chain.run_before("parser").await;
        chain.run_after("parser", Duration::from_millis(1)).await;

        assert_eq!(
            *calls.lock(),
            vec![
                "early:before:parser",
                "late:before:parser",
                "late:after:parser",
                "early:after:parser",
            ]
        );
    }

    #[tokio::test]
    async fn test_chain_error_hooks() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = InterceptorChain::new().with(recording("only", 0, &calls));

        let error = StageError::failed("optimizer", "boom");
        chain.run_on_error("optimizer", Duration::ZERO, &error).await;

        assert_eq!(*calls.lock(), vec!["only:error:optimizer"]);
    }
}

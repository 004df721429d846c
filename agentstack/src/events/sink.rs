//! Log sink trait and implementations.

use super::{LogCategory, LogEvent, LogLevel};
use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

/// Append-only destination for [`LogEvent`]s.
///
/// Recording never fails and never blocks on the caller; ordering of events
/// recorded from one task is preserved.
#[cfg_attr(test, mockall::automock)]
pub trait LogSink: Send + Sync {
    /// Records an event.
    fn record(&self, event: LogEvent);
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogSink;

impl LogSink for NoOpLogSink {
    fn record(&self, _event: LogEvent) {}
}

/// A sink that forwards events to the `tracing` framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&self, event: LogEvent) {
        let tag = event.tag.as_str();
        let category = match event.category {
            LogCategory::Checkpoint => "checkpoint",
            LogCategory::Timing => "timing",
            LogCategory::Lifecycle => "lifecycle",
        };
        match event.level {
            LogLevel::Debug => debug!(tag, category, "{}", event.message),
            LogLevel::Info => info!(tag, category, "{}", event.message),
            LogLevel::Warn => warn!(tag, category, "{}", event.message),
            LogLevel::Error => error!(tag, category, "{}", event.message),
        }
    }
}

/// A sink that keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct CollectingLogSink {
    events: RwLock<Vec<LogEvent>>,
}

impl CollectingLogSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns events with the given tag.
    #[must_use]
    pub fn events_for_tag(&self, tag: &str) -> Vec<LogEvent> {
        self.events
            .read()
            .iter()
            .filter(|e| e.tag == tag)
            .cloned()
            .collect()
    }

    /// Returns the messages of events in a category, in recording order.
    #[must_use]
    pub fn messages_in(&self, category: LogCategory) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Returns the checkpoint messages mentioning `request_id`, in order.
    #[must_use]
    pub fn checkpoints_for(&self, request_id: &str) -> Vec<String> {
        self.events
            .read()
            .iter()
            .filter(|e| e.category == LogCategory::Checkpoint && e.message.contains(request_id))
            .map(|e| e.message.clone())
            .collect()
    }
}

impl LogSink for CollectingLogSink {
    fn record(&self, event: LogEvent) {
        self.events.write().push(event);
    }
}

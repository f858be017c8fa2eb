use crate::error::{SinkError, SinkResult};
use crate::metadata::Metadata;
use crate::report::ErrorDescriptor;
use crate::sink::{AnalyticsSink, CrashSink};
use std::sync::{Arc, Mutex};

/// One call made to an [`AnalyticsSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedEvent {
    /// Event name.
    pub name: String,
    /// Event parameters.
    pub parameters: Metadata,
}

/// An analytics sink that keeps every event in memory.
///
/// Clones share the same storage, so a clone can be handed to a router and
/// the original inspected afterwards.
///
/// # Example
///
/// ```
/// use log_analytics::testing::InMemoryAnalyticsSink;
/// use log_analytics::{Level, LogRecord, LogRouter, Source};
///
/// let sink = InMemoryAnalyticsSink::default();
/// let router = LogRouter::builder().with_analytics_sink(sink.clone()).build();
///
/// router.route(
///     &LogRecord::builder(Level::Info)
///         .source(Source::AnalyticsEvent)
///         .message("purchase")
///         .build(),
/// );
///
/// let events = sink.get_emitted_events().unwrap();
/// assert_eq!(events[0].name, "purchase");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryAnalyticsSink {
    events: Arc<Mutex<Vec<EmittedEvent>>>,
}

impl InMemoryAnalyticsSink {
    /// Returns the events logged so far, oldest first.
    pub fn get_emitted_events(&self) -> SinkResult<Vec<EmittedEvent>> {
        self.events
            .lock()
            .map(|events| events.clone())
            .map_err(|e| SinkError::InternalFailure(format!("Failed to lock events: {e}")))
    }

    /// Clears the stored events.
    pub fn reset(&self) {
        let _ = self.events.lock().map(|mut events| events.clear());
    }
}

impl AnalyticsSink for InMemoryAnalyticsSink {
    fn log_event(&self, name: &str, parameters: &Metadata) {
        if let Ok(mut events) = self.events.lock() {
            events.push(EmittedEvent {
                name: name.to_owned(),
                parameters: parameters.clone(),
            });
        }
    }
}

/// A crash sink that keeps every recorded error in memory.
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCrashSink {
    errors: Arc<Mutex<Vec<ErrorDescriptor>>>,
}

impl InMemoryCrashSink {
    /// Returns the errors recorded so far, oldest first.
    pub fn get_recorded_errors(&self) -> SinkResult<Vec<ErrorDescriptor>> {
        let errors = self.errors.lock()?;
        Ok(errors.clone())
    }

    /// Clears the stored errors.
    pub fn reset(&self) {
        let _ = self.errors.lock().map(|mut errors| errors.clear());
    }
}

impl CrashSink for InMemoryCrashSink {
    fn record(&self, error: &ErrorDescriptor) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(error.clone());
        }
    }
}

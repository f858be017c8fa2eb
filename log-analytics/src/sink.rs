//! The two capabilities the router dispatches to.
//!
//! Implementations wrap a vendor SDK and own everything past the call:
//! delivery, batching, retries and persistence. Both calls happen on the
//! logging thread, so they should hand work off rather than block.
use crate::metadata::Metadata;
use crate::report::ErrorDescriptor;
use std::sync::Arc;

/// Event name used for screen views.
pub const SCREEN_VIEW_EVENT: &str = "screen_view";

/// Screen-view parameter holding the screen name.
pub const SCREEN_NAME_PARAMETER: &str = crate::metadata::keys::SCREEN_NAME;

/// Screen-view parameter holding the screen class.
pub const SCREEN_CLASS_PARAMETER: &str = crate::metadata::keys::SCREEN_CLASS;

/// Receives analytics events and screen views.
pub trait AnalyticsSink: Send + Sync {
    /// Logs one event.
    fn log_event(&self, name: &str, parameters: &Metadata);
}

/// Receives error reports.
pub trait CrashSink: Send + Sync {
    /// Records one non-fatal error.
    fn record(&self, error: &ErrorDescriptor);
}

impl<T: AnalyticsSink + ?Sized> AnalyticsSink for &T {
    fn log_event(&self, name: &str, parameters: &Metadata) {
        (**self).log_event(name, parameters)
    }
}

impl<T: AnalyticsSink + ?Sized> AnalyticsSink for Arc<T> {
    fn log_event(&self, name: &str, parameters: &Metadata) {
        (**self).log_event(name, parameters)
    }
}

impl<T: AnalyticsSink + ?Sized> AnalyticsSink for Box<T> {
    fn log_event(&self, name: &str, parameters: &Metadata) {
        (**self).log_event(name, parameters)
    }
}

impl<T: CrashSink + ?Sized> CrashSink for &T {
    fn record(&self, error: &ErrorDescriptor) {
        (**self).record(error)
    }
}

impl<T: CrashSink + ?Sized> CrashSink for Arc<T> {
    fn record(&self, error: &ErrorDescriptor) {
        (**self).record(error)
    }
}

impl<T: CrashSink + ?Sized> CrashSink for Box<T> {
    fn record(&self, error: &ErrorDescriptor) {
        (**self).record(error)
    }
}

/// A sink that drops everything. Used for whichever sink a router was built
/// without.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink(());

impl NoopSink {
    /// Create a new no-op sink.
    pub fn new() -> Self {
        NoopSink(())
    }
}

impl AnalyticsSink for NoopSink {
    fn log_event(&self, _name: &str, _parameters: &Metadata) {}
}

impl CrashSink for NoopSink {
    fn record(&self, _error: &ErrorDescriptor) {}
}

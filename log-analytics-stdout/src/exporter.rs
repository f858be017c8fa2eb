use chrono::{DateTime, Utc};
use core::fmt;
use log_analytics::{AnalyticsSink, CrashSink, ErrorDescriptor, Metadata};
use std::sync::atomic::{AtomicU64, Ordering};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// An [`AnalyticsSink`] that writes events to stdout.
#[derive(Default)]
pub struct AnalyticsExporter {
    emitted: AtomicU64,
}

impl AnalyticsExporter {
    /// Number of events printed so far.
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for AnalyticsExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnalyticsExporter")
    }
}

impl AnalyticsSink for AnalyticsExporter {
    fn log_event(&self, name: &str, parameters: &Metadata) {
        let index = self.emitted.fetch_add(1, Ordering::Relaxed);
        print!("{}", format_event(index, Utc::now(), name, parameters));
    }
}

/// A [`CrashSink`] that writes error reports to stdout.
#[derive(Default)]
pub struct CrashExporter {
    recorded: AtomicU64,
}

impl CrashExporter {
    /// Number of errors printed so far.
    pub fn recorded_count(&self) -> u64 {
        self.recorded.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for CrashExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CrashExporter")
    }
}

impl CrashSink for CrashExporter {
    fn record(&self, error: &ErrorDescriptor) {
        let index = self.recorded.fetch_add(1, Ordering::Relaxed);
        print!("{}", format_error(index, Utc::now(), error));
    }
}

fn format_event(index: u64, timestamp: DateTime<Utc>, name: &str, parameters: &Metadata) -> String {
    let parameters = match serde_json::to_string(parameters) {
        Ok(json) => json,
        Err(_) => parameters.to_string(),
    };
    format!(
        "Analytics Event #{index}\n\t Timestamp: {}\n\t Name: {name:?}\n\t Parameters: {parameters}\n",
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

fn format_error(index: u64, timestamp: DateTime<Utc>, error: &ErrorDescriptor) -> String {
    let body = match serde_json::to_string(error) {
        Ok(json) => json,
        Err(_) => format!("{error:?}"),
    };
    format!(
        "Error Report #{index}\n\t Timestamp: {}\n\t Error: {error}\n\t Details: {body}\n",
        timestamp.format(TIMESTAMP_FORMAT)
    )
}

//! Sinks that print analytics events and error reports to stdout.
//!
//! Useful for debugging and examples. Each call prints one block immediately,
//! parameters and errors are rendered as JSON.
//!
//! ```
//! use log_analytics::{Level, LogRecord, LogRouter};
//! use log_analytics_stdout::{AnalyticsExporter, CrashExporter};
//!
//! let router = LogRouter::builder()
//!     .with_analytics_sink(AnalyticsExporter::default())
//!     .with_crash_sink(CrashExporter::default())
//!     .build();
//!
//! router.route(
//!     &LogRecord::builder(Level::Info)
//!         .message("purchase")
//!         .source_tag("AnalyticsEvent")
//!         .attribute("item", "widget")
//!         .build(),
//! );
//! ```
#![warn(missing_debug_implementations, missing_docs)]

mod exporter;

pub use exporter::{AnalyticsExporter, CrashExporter};

//! Routes structured log records to an analytics sink and a crash reporting
//! sink.
//!
//! Applications keep logging through their usual façade (`log` or `tracing`).
//! An appender crate turns every call into a [`LogRecord`] and hands it to a
//! [`LogRouter`], which decides what the record is:
//!
//! | source tag / level | [`RecordKind`] | sink call |
//! |---|---|---|
//! | `AnalyticsEvent` | `AnalyticsEvent` | [`AnalyticsSink::log_event`] with the message as event name and the metadata as parameters |
//! | `AnalyticsScreen` | `ScreenView` | [`AnalyticsSink::log_event`] with [`SCREEN_VIEW_EVENT`] and `screenName` / `screenClass` |
//! | `AnalyticsError`, or level `error` / `critical` | `ErrorReport` | [`CrashSink::record`], if the metadata carries `domain` and `code` |
//! | anything else | `Plain` | none |
//!
//! The sinks wrap whatever vendor SDK does the actual delivery; this crate
//! stops at the call.
//!
//! # Metadata
//!
//! Everything a record carries besides its message travels as flat
//! [`Metadata`]. Typed descriptors move in and out of it through
//! [`MetadataCodec`]. The key names in [`metadata::keys`] are reserved: an
//! encoded descriptor overwrites caller entries with the same names.
//!
//! # Example
//!
//! ```
//! use log_analytics::{
//!     AnalyticsScreen, AnalyticsSink, ErrorDescriptor, Level, LogRecord, LogRouter, Metadata,
//!     MetadataCodec, Source,
//! };
//!
//! struct PrintSink;
//!
//! impl AnalyticsSink for PrintSink {
//!     fn log_event(&self, name: &str, parameters: &Metadata) {
//!         println!("{name} {parameters}");
//!     }
//! }
//!
//! let router = LogRouter::builder().with_analytics_sink(PrintSink).build();
//!
//! // prints: screen_view {screenClass="HomeViewController", screenName="Home"}
//! router.route(
//!     &LogRecord::builder(Level::Info)
//!         .source(Source::AnalyticsScreen)
//!         .metadata(AnalyticsScreen::new("Home", "HomeViewController").encode())
//!         .build(),
//! );
//!
//! // no crash sink was set, so this error report is dropped by a no-op sink
//! router.route(
//!     &LogRecord::builder(Level::Error)
//!         .message("NSURLErrorDomain[-1009]")
//!         .metadata(ErrorDescriptor::new("NSURLErrorDomain", -1009).encode())
//!         .build(),
//! );
//! ```
//!
//! # Feature Flags
//!
//! * `testing`: in-memory sinks in the `testing` module.
//! * `with-serde`: `serde` support for the data model.
//! * `internal-logs`: emit the crate's own diagnostics through `tracing`.
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![cfg_attr(test, deny(warnings))]

mod config;
pub mod error;
mod event;
pub mod internal_logging;
pub mod metadata;
mod record;
mod report;
mod router;
mod sink;
mod source;

#[cfg(any(feature = "testing", test))]
pub mod testing;

pub use config::{RouterConfig, RouterConfigBuilder};
pub use event::{AnalyticsEvent, AnalyticsScreen, Event};
pub use metadata::{Metadata, MetadataCodec};
pub use record::{Level, LogRecord, LogRecordBuilder, ParseLevelError, RecordKind};
pub use report::{AnalyticsError, AnalyticsErrorInfo, ErrorDescriptor};
pub use router::{LogRouter, LogRouterBuilder, RouterStats};
pub use sink::{
    AnalyticsSink, CrashSink, NoopSink, SCREEN_CLASS_PARAMETER, SCREEN_NAME_PARAMETER,
    SCREEN_VIEW_EVENT,
};
pub use source::Source;

#[cfg(feature = "internal-logs")]
#[doc(hidden)]
pub mod _private {
    pub use tracing::{debug, error, info, warn}; // re-export
}

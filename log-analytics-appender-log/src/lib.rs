//! Bridges the [`log`](https://docs.rs/log/latest/log/) crate to log-analytics.
//!
//! [`AnalyticsLogBridge`] implements [`log::Log`]. Every record that passes
//! the router's minimum level is converted into a [`log_analytics::LogRecord`]
//! and routed to the analytics and crash sinks.
//!
//! The [`emit`] module holds the calls applications use to produce analytics
//! traffic: events, screen views and errors.
//!
//! # Getting Started
//!
//! ```no_run
//! use log_analytics::{Event, LogRouter};
//! use log_analytics_appender_log::{emit, AnalyticsLogBridge};
//! use log_analytics_stdout::{AnalyticsExporter, CrashExporter};
//!
//! let router = LogRouter::builder()
//!     .with_analytics_sink(AnalyticsExporter::default())
//!     .with_crash_sink(CrashExporter::default())
//!     .build();
//! AnalyticsLogBridge::new(router).init().unwrap();
//!
//! emit::record_event(&Event::new("purchase").with_attribute("item", "widget"));
//! emit::record_screen_view("Home", "HomeViewController");
//! log::info!("plain log lines are not forwarded");
//! ```
//!
//! ## Mapping details
//!
//! | `log`          | log-analytics      | Notes |
//! |----------------|--------------------|-------|
//! | `target`       | source tag        | `"AnalyticsEvent"`, `"AnalyticsScreen"` and `"AnalyticsError"` select the record kind; module paths are plain records |
//! | `level`        | [`Level`]          | `Warn` maps to `Warning`. `log` has no `notice` or `critical` |
//! | `args`         | message            | For events this is the event name |
//! | key-values     | metadata           | Values are stored with their `Display` form |
//!
//! Records whose target starts with `log-analytics` are the crates' own
//! diagnostics and are never routed.
//!
//! [`Level`]: log_analytics::Level
#![warn(missing_debug_implementations, missing_docs)]

use log::kv::{self, Key, Value, VisitSource};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use log_analytics::internal_logging::is_internal_target;
use log_analytics::{AnalyticsSink, CrashSink, Level, LogRecord, LogRouter, NoopSink};

pub mod emit;

/// A [`log::Log`] implementation that routes records through a [`LogRouter`].
#[derive(Debug)]
pub struct AnalyticsLogBridge<A = NoopSink, C = NoopSink> {
    router: LogRouter<A, C>,
}

impl<A, C> AnalyticsLogBridge<A, C>
where
    A: AnalyticsSink,
    C: CrashSink,
{
    /// Wraps a router.
    pub fn new(router: LogRouter<A, C>) -> Self {
        log_analytics::analytics_debug!(
            name: "AnalyticsLogBridge.Created",
            min_level = router.min_level().as_str()
        );
        AnalyticsLogBridge { router }
    }

    /// The wrapped router.
    pub fn router(&self) -> &LogRouter<A, C> {
        &self.router
    }

    /// Mutable access to the wrapped router, e.g. to change its metadata
    /// before installing the bridge.
    pub fn router_mut(&mut self) -> &mut LogRouter<A, C> {
        &mut self.router
    }

    /// The `log` filter matching the router's minimum level.
    pub fn max_level(&self) -> LevelFilter {
        to_level_filter(self.router.min_level())
    }
}

impl<A, C> AnalyticsLogBridge<A, C>
where
    A: AnalyticsSink + 'static,
    C: CrashSink + 'static,
{
    /// Installs the bridge as the global logger and sets the global maximum
    /// level to [`max_level`](Self::max_level).
    pub fn init(self) -> Result<(), SetLoggerError> {
        let max_level = self.max_level();
        log::set_boxed_logger(Box::new(self)).map_err(|err| {
            log_analytics::analytics_error!(
                name: "AnalyticsLogBridge.InitFailed",
                error = format!("{err}")
            );
            err
        })?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl<A, C> Log for AnalyticsLogBridge<A, C>
where
    A: AnalyticsSink,
    C: CrashSink,
{
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_internal_target(metadata.target())
            && self.router.enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut visitor = MetadataVisitor::default();
        // Visiting only fails if the visitor does, and ours never does.
        let _ = record.key_values().visit(&mut visitor);

        self.router.route(
            &LogRecord::builder(map_level(record.level()))
                .message(record.args().to_string())
                .source_tag(record.target().to_owned())
                .metadata(visitor.metadata)
                .build(),
        );
    }

    fn flush(&self) {}
}

/// Collects key-values as metadata strings.
#[derive(Default)]
struct MetadataVisitor {
    metadata: log_analytics::Metadata,
}

impl<'kvs> VisitSource<'kvs> for MetadataVisitor {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        self.metadata.insert(key.as_str(), value.to_string());
        Ok(())
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warning,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

fn to_level_filter(level: Level) -> LevelFilter {
    match level {
        Level::Trace => LevelFilter::Trace,
        Level::Debug => LevelFilter::Debug,
        Level::Info | Level::Notice => LevelFilter::Info,
        Level::Warning => LevelFilter::Warn,
        Level::Error | Level::Critical => LevelFilter::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::MetadataSource;
    use log_analytics::testing::{EmittedEvent, InMemoryAnalyticsSink, InMemoryCrashSink};
    use log_analytics::{ErrorDescriptor, Metadata as AnalyticsMetadata, MetadataCodec};

    fn bridge(
        min_level: Level,
    ) -> (
        AnalyticsLogBridge<InMemoryAnalyticsSink, InMemoryCrashSink>,
        InMemoryAnalyticsSink,
        InMemoryCrashSink,
    ) {
        let analytics = InMemoryAnalyticsSink::default();
        let crash = InMemoryCrashSink::default();
        let router = LogRouter::builder()
            .with_analytics_sink(analytics.clone())
            .with_crash_sink(crash.clone())
            .with_min_level(min_level)
            .build();
        (AnalyticsLogBridge::new(router), analytics, crash)
    }

    #[test]
    fn logbridge_routes_event_with_key_values() {
        let (bridge, analytics, _) = bridge(Level::Info);

        bridge.log(
            &Record::builder()
                .level(log::Level::Info)
                .target("AnalyticsEvent")
                .args(format_args!("purchase"))
                .key_values(&[("item", "widget"), ("quantity", "2")])
                .build(),
        );

        assert_eq!(
            analytics.get_emitted_events().unwrap(),
            vec![EmittedEvent {
                name: "purchase".into(),
                parameters: AnalyticsMetadata::new()
                    .with("item", "widget")
                    .with("quantity", "2"),
            }]
        );
    }

    #[test]
    fn logbridge_stringifies_non_string_values() {
        let (bridge, analytics, _) = bridge(Level::Info);
        let pairs: [(&str, Value<'_>); 2] = [("count", Value::from(3u64)), ("ok", Value::from(true))];

        bridge.log(
            &Record::builder()
                .level(log::Level::Info)
                .target("AnalyticsEvent")
                .args(format_args!("sync_done"))
                .key_values(&pairs)
                .build(),
        );

        let events = analytics.get_emitted_events().unwrap();
        assert_eq!(events[0].parameters.get("count"), Some("3"));
        assert_eq!(events[0].parameters.get("ok"), Some("true"));
    }

    #[test]
    fn logbridge_routes_error_level_with_payload() {
        let (bridge, _, crash) = bridge(Level::Info);
        let error = ErrorDescriptor::new("NSURLErrorDomain", -1009);
        let metadata = error.encode();

        bridge.log(
            &Record::builder()
                .level(log::Level::Error)
                .target("my_app::network")
                .args(format_args!("{error}"))
                .key_values(&MetadataSource(&metadata))
                .build(),
        );

        let recorded = crash.get_recorded_errors().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].domain, "NSURLErrorDomain");
        assert_eq!(recorded[0].code, -1009);
    }

    #[test]
    fn logbridge_plain_error_without_payload_is_dropped() {
        let (bridge, analytics, crash) = bridge(Level::Info);

        bridge.log(
            &Record::builder()
                .level(log::Level::Error)
                .target("my_app")
                .args(format_args!("something failed"))
                .build(),
        );

        assert!(crash.get_recorded_errors().unwrap().is_empty());
        assert!(analytics.get_emitted_events().unwrap().is_empty());
        assert_eq!(bridge.router().stats().dropped_error_reports(), 1);
    }

    #[test]
    fn logbridge_respects_min_level() {
        let (bridge, analytics, _) = bridge(Level::Warning);

        let record = Record::builder()
            .level(log::Level::Info)
            .target("AnalyticsEvent")
            .args(format_args!("purchase"))
            .build();
        assert!(!bridge.enabled(record.metadata()));
        bridge.log(&record);

        assert!(analytics.get_emitted_events().unwrap().is_empty());
        assert_eq!(bridge.max_level(), LevelFilter::Warn);
    }

    #[test]
    fn logbridge_skips_internal_diagnostics() {
        let (bridge, _, crash) = bridge(Level::Trace);
        let metadata = ErrorDescriptor::new("d", 1).encode();

        bridge.log(
            &Record::builder()
                .level(log::Level::Error)
                .target("log-analytics")
                .args(format_args!("LogRouter.Built"))
                .key_values(&MetadataSource(&metadata))
                .build(),
        );

        assert!(crash.get_recorded_errors().unwrap().is_empty());
    }

    #[test]
    fn level_mapping() {
        assert_eq!(map_level(log::Level::Warn), Level::Warning);
        assert_eq!(map_level(log::Level::Error), Level::Error);
        assert_eq!(to_level_filter(Level::Notice), LevelFilter::Info);
        assert_eq!(to_level_filter(Level::Critical), LevelFilter::Error);
    }
}

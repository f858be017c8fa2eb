//! Convenience calls that produce analytics traffic through `log`.
//!
//! Each call builds a record tagged the way the router expects and hands it
//! to a logger. The `_to` variants take the logger explicitly; the others use
//! the global [`log::logger()`] and honour [`log::max_level()`] like the `log`
//! macros do.
//!
//! | call | level | target | message | key-values |
//! |---|---|---|---|---|
//! | [`log_error`] | `Error` | none | `domain[code]` | the five error keys |
//! | [`record_error`] | `Error` | `AnalyticsError` | `domain[code]` | the five error keys |
//! | [`record_event`] | `Info` | `AnalyticsEvent` | event name | event attributes |
//! | [`record_screen`] | `Info` | `AnalyticsScreen` | `Screen View` | `screenName`, `screenClass` |
use log::kv::{self, Key, Value, VisitSource};
use log::{Log, Record};
use log_analytics::{
    AnalyticsError, AnalyticsEvent, AnalyticsScreen, ErrorDescriptor, Metadata, MetadataCodec,
    Source,
};
use std::error::Error;
use std::panic::Location;

/// Message used for screen views.
pub const SCREEN_VIEW_MESSAGE: &str = "Screen View";

/// Exposes [`Metadata`] as `log` key-values.
#[derive(Debug)]
pub(crate) struct MetadataSource<'a>(pub(crate) &'a Metadata);

impl kv::Source for MetadataSource<'_> {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), kv::Error> {
        for (key, value) in self.0 {
            visitor.visit_pair(Key::from_str(key), Value::from(value))?;
        }
        Ok(())
    }

    fn count(&self) -> usize {
        self.0.len()
    }
}

fn emit(
    logger: &dyn Log,
    level: log::Level,
    target: &str,
    message: &str,
    metadata: &Metadata,
    location: &'static Location<'static>,
) {
    let source = MetadataSource(metadata);
    logger.log(
        &Record::builder()
            .level(level)
            .target(target)
            .args(format_args!("{message}"))
            .key_values(&source)
            .file_static(Some(location.file()))
            .line(Some(location.line()))
            .build(),
    );
}

fn globally_enabled(level: log::Level) -> bool {
    level <= log::max_level()
}

/// Logs a generic error at error level.
///
/// The error becomes an [`ErrorDescriptor`] via
/// [`ErrorDescriptor::from_generic_error`], so the router reports it to the
/// crash sink like any other error-level record with a payload.
#[track_caller]
pub fn log_error_to<E>(logger: &dyn Log, error: &E)
where
    E: Error + 'static,
{
    emit_error(logger, "", &ErrorDescriptor::from_generic_error(error));
}

/// [`log_error_to`] for an already erased error.
#[track_caller]
pub fn log_dyn_error_to(logger: &dyn Log, error: &(dyn Error + 'static)) {
    emit_error(logger, "", &ErrorDescriptor::from_dyn_error(error));
}

/// Records a structured error with the `AnalyticsError` source tag.
#[track_caller]
pub fn record_error_to<E>(logger: &dyn Log, error: &E)
where
    E: AnalyticsError + ?Sized,
{
    emit_error(
        logger,
        Source::AnalyticsError.as_str(),
        &ErrorDescriptor::from_structured_error(error),
    );
}

#[track_caller]
fn emit_error(logger: &dyn Log, target: &str, descriptor: &ErrorDescriptor) {
    emit(
        logger,
        log::Level::Error,
        target,
        &descriptor.to_string(),
        &descriptor.encode(),
        Location::caller(),
    );
}

/// Records an analytics event.
#[track_caller]
pub fn record_event_to<E>(logger: &dyn Log, event: &E)
where
    E: AnalyticsEvent + ?Sized,
{
    emit(
        logger,
        log::Level::Info,
        Source::AnalyticsEvent.as_str(),
        event.name(),
        &event.attributes().unwrap_or_default(),
        Location::caller(),
    );
}

/// Records a screen view.
#[track_caller]
pub fn record_screen_to(logger: &dyn Log, screen: &AnalyticsScreen) {
    emit(
        logger,
        log::Level::Info,
        Source::AnalyticsScreen.as_str(),
        SCREEN_VIEW_MESSAGE,
        &screen.encode(),
        Location::caller(),
    );
}

/// Records a screen view from its name and class.
#[track_caller]
pub fn record_screen_view_to(logger: &dyn Log, screen_name: &str, screen_class: &str) {
    record_screen_to(logger, &AnalyticsScreen::new(screen_name, screen_class));
}

/// [`log_error_to`] on the global logger.
#[track_caller]
pub fn log_error<E>(error: &E)
where
    E: Error + 'static,
{
    if globally_enabled(log::Level::Error) {
        log_error_to(log::logger(), error);
    }
}

/// [`log_dyn_error_to`] on the global logger.
#[track_caller]
pub fn log_dyn_error(error: &(dyn Error + 'static)) {
    if globally_enabled(log::Level::Error) {
        log_dyn_error_to(log::logger(), error);
    }
}

/// [`record_error_to`] on the global logger.
#[track_caller]
pub fn record_error<E>(error: &E)
where
    E: AnalyticsError + ?Sized,
{
    if globally_enabled(log::Level::Error) {
        record_error_to(log::logger(), error);
    }
}

/// [`record_event_to`] on the global logger.
#[track_caller]
pub fn record_event<E>(event: &E)
where
    E: AnalyticsEvent + ?Sized,
{
    if globally_enabled(log::Level::Info) {
        record_event_to(log::logger(), event);
    }
}

/// [`record_screen_to`] on the global logger.
#[track_caller]
pub fn record_screen(screen: &AnalyticsScreen) {
    if globally_enabled(log::Level::Info) {
        record_screen_to(log::logger(), screen);
    }
}

/// [`record_screen_view_to`] on the global logger.
#[track_caller]
pub fn record_screen_view(screen_name: &str, screen_class: &str) {
    if globally_enabled(log::Level::Info) {
        record_screen_view_to(log::logger(), screen_name, screen_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnalyticsLogBridge;
    use log_analytics::testing::{InMemoryAnalyticsSink, InMemoryCrashSink};
    use log_analytics::{AnalyticsErrorInfo, Event, Level, LogRouter};
    use std::sync::Mutex;

    /// Keeps the raw records so the emitted shape can be checked without a router.
    #[derive(Default)]
    struct CapturingLogger {
        records: Mutex<Vec<(log::Level, String, String, Metadata, Option<u32>)>>,
    }

    impl Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            struct Collect(Metadata);
            impl<'kvs> VisitSource<'kvs> for Collect {
                fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
                    self.0.insert(key.as_str(), value.to_string());
                    Ok(())
                }
            }
            let mut collect = Collect(Metadata::new());
            record.key_values().visit(&mut collect).unwrap();
            self.records.lock().unwrap().push((
                record.level(),
                record.target().to_owned(),
                record.args().to_string(),
                collect.0,
                record.line(),
            ));
        }

        fn flush(&self) {}
    }

    struct PaymentError;

    impl AnalyticsError for PaymentError {
        fn domain(&self) -> &str {
            "com.example.payments"
        }

        fn code(&self) -> i64 {
            402
        }

        fn user_info(&self) -> Option<AnalyticsErrorInfo> {
            Some(AnalyticsErrorInfo::new(
                "payment required",
                None,
                Some("add a card".to_owned()),
            ))
        }
    }

    fn bridge() -> (
        AnalyticsLogBridge<InMemoryAnalyticsSink, InMemoryCrashSink>,
        InMemoryAnalyticsSink,
        InMemoryCrashSink,
    ) {
        let analytics = InMemoryAnalyticsSink::default();
        let crash = InMemoryCrashSink::default();
        let router = LogRouter::builder()
            .with_analytics_sink(analytics.clone())
            .with_crash_sink(crash.clone())
            .with_min_level(Level::Info)
            .build();
        (AnalyticsLogBridge::new(router), analytics, crash)
    }

    #[test]
    fn record_event_shape() {
        let logger = CapturingLogger::default();
        record_event_to(&logger, &Event::new("purchase").with_attribute("item", "widget"));

        let records = logger.records.lock().unwrap();
        let (level, target, message, metadata, line) = &records[0];
        assert_eq!(*level, log::Level::Info);
        assert_eq!(target, "AnalyticsEvent");
        assert_eq!(message, "purchase");
        assert_eq!(metadata, &Metadata::new().with("item", "widget"));
        assert!(line.is_some());
    }

    #[test]
    fn record_screen_shape() {
        let logger = CapturingLogger::default();
        record_screen_view_to(&logger, "Home", "HomeViewController");

        let records = logger.records.lock().unwrap();
        let (level, target, message, metadata, _) = &records[0];
        assert_eq!(*level, log::Level::Info);
        assert_eq!(target, "AnalyticsScreen");
        assert_eq!(message, SCREEN_VIEW_MESSAGE);
        assert_eq!(metadata.get("screenName"), Some("Home"));
        assert_eq!(metadata.get("screenClass"), Some("HomeViewController"));
    }

    #[test]
    fn record_error_shape() {
        let logger = CapturingLogger::default();
        record_error_to(&logger, &PaymentError);

        let records = logger.records.lock().unwrap();
        let (level, target, message, metadata, _) = &records[0];
        assert_eq!(*level, log::Level::Error);
        assert_eq!(target, "AnalyticsError");
        assert_eq!(message, "com.example.payments[402]");
        assert_eq!(metadata.len(), 5);
        assert_eq!(metadata.get("recoverySuggestion"), Some("add a card"));
        assert_eq!(metadata.get("failureReason"), Some(""));
    }

    #[test]
    fn screen_view_reaches_analytics_sink() {
        let (bridge, analytics, _) = bridge();
        record_screen_to(&bridge, &AnalyticsScreen::new("Home", "HomeViewController"));

        let events = analytics.get_emitted_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "screen_view");
        assert_eq!(
            events[0].parameters,
            Metadata::new()
                .with("screenName", "Home")
                .with("screenClass", "HomeViewController")
        );
    }

    #[test]
    fn event_reaches_analytics_sink() {
        let (bridge, analytics, crash) = bridge();
        record_event_to(&bridge, &Event::new("purchase").with_attribute("item", "widget"));

        let events = analytics.get_emitted_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "purchase");
        assert_eq!(events[0].parameters, Metadata::new().with("item", "widget"));
        assert!(crash.get_recorded_errors().unwrap().is_empty());
    }

    #[test]
    fn generic_error_reaches_crash_sink() {
        let (bridge, analytics, crash) = bridge();
        let error = ErrorDescriptor::new("NSURLErrorDomain", -1009);

        log_error_to(&bridge, &error);

        let recorded = crash.get_recorded_errors().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].domain, "NSURLErrorDomain");
        assert_eq!(recorded[0].code, -1009);
        assert!(analytics.get_emitted_events().unwrap().is_empty());
    }

    #[test]
    fn boxed_error_reaches_crash_sink() {
        let (bridge, _, crash) = bridge();
        let error: Box<dyn Error> = Box::new(std::io::Error::from_raw_os_error(13));

        log_dyn_error_to(&bridge, error.as_ref());

        let recorded = crash.get_recorded_errors().unwrap();
        assert_eq!(recorded[0].domain, "std::io::error::Error");
        assert_eq!(recorded[0].code, 13);
    }

    #[test]
    fn structured_error_reaches_crash_sink() {
        let (bridge, _, crash) = bridge();
        record_error_to(&bridge, &PaymentError);

        assert_eq!(
            crash.get_recorded_errors().unwrap(),
            vec![ErrorDescriptor::new("com.example.payments", 402)
                .with_description("payment required")
                .with_failure_reason("")
                .with_recovery_suggestion("add a card")]
        );
    }
}

use crate::config::RouterConfig;
use crate::event::AnalyticsScreen;
use crate::metadata::{Metadata, MetadataCodec};
use crate::record::{Level, LogRecord, RecordKind};
use crate::sink::{AnalyticsSink, CrashSink, NoopSink, SCREEN_VIEW_EVENT};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a router has silently dropped.
#[derive(Debug, Default)]
pub struct RouterStats {
    dropped_error_reports: AtomicU64,
}

impl RouterStats {
    /// Records classified as error reports that carried no `domain`/`code`
    /// payload and were therefore not dispatched.
    pub fn dropped_error_reports(&self) -> u64 {
        self.dropped_error_reports.load(Ordering::Relaxed)
    }
}

/// Classifies log records and dispatches them to an analytics sink and a
/// crash sink.
///
/// See [`RecordKind::classify`] for the classification rules. Each routed
/// record results in at most one sink call.
#[derive(Debug)]
pub struct LogRouter<A = NoopSink, C = NoopSink> {
    analytics: A,
    crash: C,
    min_level: Level,
    metadata: Metadata,
    stats: RouterStats,
}

impl LogRouter {
    /// Starts building a router. Sinks that are never set drop their calls.
    pub fn builder() -> LogRouterBuilder {
        LogRouterBuilder::default()
    }
}

impl<A, C> LogRouter<A, C>
where
    A: AnalyticsSink,
    C: CrashSink,
{
    /// Routes one record.
    ///
    /// Never fails and never logs: undecodable error reports are counted in
    /// [`stats`](Self::stats) and otherwise ignored. The minimum level is not
    /// applied here; appenders check [`enabled`](Self::enabled) first.
    pub fn route(&self, record: &LogRecord) {
        match RecordKind::classify(record) {
            Some(kind) => self.dispatch(kind),
            None => {
                self.stats
                    .dropped_error_reports
                    .fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Hands an already classified record to its sink.
    pub fn dispatch(&self, kind: RecordKind) {
        match kind {
            RecordKind::Plain => {}
            RecordKind::AnalyticsEvent { name, attributes } => {
                self.analytics.log_event(&name, &attributes);
            }
            RecordKind::ScreenView(screen) => {
                self.analytics
                    .log_event(SCREEN_VIEW_EVENT, &screen_view_parameters(&screen));
            }
            RecordKind::ErrorReport(error) => self.crash.record(&error),
        }
    }

    /// Returns true if records at `level` should be routed.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    /// Minimum level for routed records.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Changes the minimum level.
    pub fn set_min_level(&mut self, level: Level) {
        self.min_level = level;
    }

    /// Drop counters.
    pub fn stats(&self) -> &RouterStats {
        &self.stats
    }

    /// The analytics sink.
    pub fn analytics_sink(&self) -> &A {
        &self.analytics
    }

    /// The crash sink.
    pub fn crash_sink(&self) -> &C {
        &self.crash
    }

    /// Handler-level metadata.
    ///
    /// Kept for façades that attach metadata to their handlers. Routing never
    /// reads it.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Mutable access to the handler-level metadata.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Reads one handler-level metadata value.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key)
    }

    /// Sets or, with `None`, removes one handler-level metadata value.
    pub fn set_metadata_value(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.metadata.insert(key, value);
            }
            None => {
                self.metadata.remove(&key);
            }
        }
    }
}

fn screen_view_parameters(screen: &AnalyticsScreen) -> Metadata {
    // The codec keys double as the screen-view parameter names.
    screen.encode()
}

/// Builder for [`LogRouter`].
#[derive(Debug)]
pub struct LogRouterBuilder<A = NoopSink, C = NoopSink> {
    analytics: A,
    crash: C,
    config: Option<RouterConfig>,
    min_level: Option<Level>,
    metadata: Metadata,
}

impl Default for LogRouterBuilder {
    fn default() -> Self {
        LogRouterBuilder {
            analytics: NoopSink::new(),
            crash: NoopSink::new(),
            config: None,
            min_level: None,
            metadata: Metadata::new(),
        }
    }
}

impl<A, C> LogRouterBuilder<A, C>
where
    A: AnalyticsSink,
    C: CrashSink,
{
    /// Sets the analytics sink.
    pub fn with_analytics_sink<S: AnalyticsSink>(self, sink: S) -> LogRouterBuilder<S, C> {
        LogRouterBuilder {
            analytics: sink,
            crash: self.crash,
            config: self.config,
            min_level: self.min_level,
            metadata: self.metadata,
        }
    }

    /// Sets the crash sink.
    pub fn with_crash_sink<S: CrashSink>(self, sink: S) -> LogRouterBuilder<A, S> {
        LogRouterBuilder {
            analytics: self.analytics,
            crash: sink,
            config: self.config,
            min_level: self.min_level,
            metadata: self.metadata,
        }
    }

    /// Uses `config` instead of the environment-derived default.
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the minimum level, overriding the configuration.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Adds a handler-level metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Builds the router.
    pub fn build(self) -> LogRouter<A, C> {
        let min_level = self
            .min_level
            .unwrap_or_else(|| self.config.unwrap_or_default().min_level());

        crate::analytics_debug!(
            name: "LogRouter.Built",
            min_level = min_level.as_str()
        );

        LogRouter {
            analytics: self.analytics,
            crash: self.crash,
            min_level,
            metadata: self.metadata,
            stats: RouterStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ErrorDescriptor;
    use crate::source::Source;
    use crate::testing::{EmittedEvent, InMemoryAnalyticsSink, InMemoryCrashSink};

    fn router() -> (
        LogRouter<InMemoryAnalyticsSink, InMemoryCrashSink>,
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
        (router, analytics, crash)
    }

    #[test]
    fn analytics_event_is_forwarded_verbatim() {
        let (router, analytics, crash) = router();
        let attributes = Metadata::new()
            .with("item", "widget")
            .with("domain", "not-an-error");

        router.route(
            &LogRecord::builder(Level::Info)
                .source(Source::AnalyticsEvent)
                .message("purchase")
                .metadata(attributes.clone())
                .build(),
        );

        assert_eq!(
            analytics.get_emitted_events().unwrap(),
            vec![EmittedEvent {
                name: "purchase".into(),
                parameters: attributes,
            }]
        );
        assert!(crash.get_recorded_errors().unwrap().is_empty());
    }

    #[test]
    fn screen_view_uses_reserved_event_name() {
        let (router, analytics, _) = router();

        router.route(
            &LogRecord::builder(Level::Info)
                .source(Source::AnalyticsScreen)
                .message("Screen View")
                .metadata(AnalyticsScreen::new("Home", "HomeViewController").encode())
                .build(),
        );

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
    fn screen_view_drops_unrelated_metadata() {
        let (router, analytics, _) = router();

        router.route(
            &LogRecord::builder(Level::Info)
                .source(Source::AnalyticsScreen)
                .attribute("campaign", "spring")
                .build(),
        );

        let events = analytics.get_emitted_events().unwrap();
        assert_eq!(
            events[0].parameters,
            Metadata::new().with("screenName", "").with("screenClass", "")
        );
    }

    #[test]
    fn error_report_reaches_crash_sink() {
        let (router, analytics, crash) = router();
        let error = ErrorDescriptor::new("NSURLErrorDomain", -1009)
            .with_description("The Internet connection appears to be offline.")
            .with_failure_reason("offline")
            .with_recovery_suggestion("reconnect");

        router.route(
            &LogRecord::builder(Level::Error)
                .source_tag("my_app::network")
                .message("NSURLErrorDomain[-1009]")
                .metadata(error.encode())
                .build(),
        );

        assert_eq!(crash.get_recorded_errors().unwrap(), vec![error]);
        assert!(analytics.get_emitted_events().unwrap().is_empty());
        assert_eq!(router.stats().dropped_error_reports(), 0);
    }

    #[test]
    fn undecodable_error_is_counted_not_dispatched() {
        let (router, analytics, crash) = router();

        router.route(&LogRecord::builder(Level::Error).message("boom").build());
        router.route(
            &LogRecord::builder(Level::Warning)
                .source(Source::AnalyticsError)
                .attribute("code", "3")
                .build(),
        );

        assert!(crash.get_recorded_errors().unwrap().is_empty());
        assert!(analytics.get_emitted_events().unwrap().is_empty());
        assert_eq!(router.stats().dropped_error_reports(), 2);
    }

    #[test]
    fn plain_records_are_not_dispatched() {
        let (router, analytics, crash) = router();

        router.route(&LogRecord::builder(Level::Info).message("hello").build());

        assert!(analytics.get_emitted_events().unwrap().is_empty());
        assert!(crash.get_recorded_errors().unwrap().is_empty());
        assert_eq!(router.stats().dropped_error_reports(), 0);
    }

    #[test]
    fn enabled_follows_min_level() {
        let (mut router, _, _) = router();
        assert!(!router.enabled(Level::Debug));
        assert!(router.enabled(Level::Info));
        assert!(router.enabled(Level::Critical));

        router.set_min_level(Level::Error);
        assert!(!router.enabled(Level::Warning));
        assert_eq!(router.min_level(), Level::Error);
    }

    #[test]
    fn min_level_from_config() {
        let router = LogRouter::builder()
            .with_config(
                crate::RouterConfigBuilder::default()
                    .with_min_level(Level::Warning)
                    .build(),
            )
            .build();
        assert_eq!(router.min_level(), Level::Warning);
    }

    #[test]
    fn handler_metadata_is_not_used_for_routing() {
        let analytics = InMemoryAnalyticsSink::default();
        let crash = InMemoryCrashSink::default();
        let mut router = LogRouter::builder()
            .with_analytics_sink(analytics.clone())
            .with_crash_sink(crash.clone())
            .with_min_level(Level::Info)
            .with_metadata("domain", "handler")
            .build();
        router.set_metadata_value("code", Some("1".to_owned()));

        assert_eq!(router.metadata_value("domain"), Some("handler"));
        router.route(&LogRecord::builder(Level::Error).message("boom").build());
        assert!(crash.get_recorded_errors().unwrap().is_empty());

        router.set_metadata_value("code", None);
        assert_eq!(router.metadata().len(), 1);
        router.metadata_mut().insert("release", "1.2.0");
        assert_eq!(router.metadata_value("release"), Some("1.2.0"));
    }

    #[test]
    fn routing_from_many_threads() {
        let (router, analytics, _) = router();

        std::thread::scope(|s| {
            for t in 0..4 {
                let router = &router;
                s.spawn(move || {
                    for i in 0..25 {
                        router.route(
                            &LogRecord::builder(Level::Info)
                                .source(Source::AnalyticsEvent)
                                .message(format!("event-{t}-{i}"))
                                .build(),
                        );
                    }
                });
            }
        });

        assert_eq!(analytics.get_emitted_events().unwrap().len(), 100);
    }
}

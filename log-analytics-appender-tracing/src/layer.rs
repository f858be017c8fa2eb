use log_analytics::internal_logging::is_internal_target;
use log_analytics::{AnalyticsSink, CrashSink, Level, LogRecord, LogRouter, Metadata, NoopSink};
use tracing_core::Subscriber;
use tracing_subscriber::{registry::LookupSpan, Layer};

const MESSAGE_FIELD: &str = "message";

/// Visitor to record the message and fields of an event.
#[derive(Default)]
struct EventVisitor {
    message: String,
    metadata: Metadata,
}

impl EventVisitor {
    fn record(&mut self, field: &tracing::field::Field, value: String) {
        if field.name() == MESSAGE_FIELD {
            self.message = value;
        } else {
            self.metadata.insert(field.name(), value);
        }
    }
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.record(field, value.to_owned());
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.record(field, value.to_string());
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.record(field, value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.record(field, value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.record(field, value.to_string());
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.record(field, value.to_string());
    }
}

/// A [`Layer`] that routes `tracing` events through a [`LogRouter`].
#[derive(Debug)]
pub struct AnalyticsTracingBridge<A = NoopSink, C = NoopSink> {
    router: LogRouter<A, C>,
}

impl<A, C> AnalyticsTracingBridge<A, C>
where
    A: AnalyticsSink,
    C: CrashSink,
{
    /// Wraps a router.
    pub fn new(router: LogRouter<A, C>) -> Self {
        log_analytics::analytics_debug!(
            name: "AnalyticsTracingBridge.Created",
            min_level = router.min_level().as_str()
        );
        AnalyticsTracingBridge { router }
    }

    /// The wrapped router.
    pub fn router(&self) -> &LogRouter<A, C> {
        &self.router
    }
}

impl<S, A, C> Layer<S> for AnalyticsTracingBridge<A, C>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    A: AnalyticsSink + 'static,
    C: CrashSink + 'static,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        if is_internal_target(meta.target()) {
            return;
        }
        let level = map_level(meta.level());
        if !self.router.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        self.router.route(
            &LogRecord::builder(level)
                .message(visitor.message)
                .source_tag(meta.target())
                .metadata(visitor.metadata)
                .build(),
        );
    }
}

fn map_level(level: &tracing_core::Level) -> Level {
    match *level {
        tracing_core::Level::TRACE => Level::Trace,
        tracing_core::Level::DEBUG => Level::Debug,
        tracing_core::Level::INFO => Level::Info,
        tracing_core::Level::WARN => Level::Warning,
        tracing_core::Level::ERROR => Level::Error,
    }
}

//! run with `$ cargo run --example logs-basic`

/// This example routes records from the [log crate](https://docs.rs/log/latest/log/) to the
/// stdout sinks. Events and screen views print as analytics events, errors print as error
/// reports, and plain lines are not forwarded.
///
use log::{error, info, warn};
use log_analytics::{AnalyticsError, AnalyticsErrorInfo, Event, LogRouter};
use log_analytics_appender_log::{emit, AnalyticsLogBridge};
use log_analytics_stdout::{AnalyticsExporter, CrashExporter};

struct CheckoutError;

impl AnalyticsError for CheckoutError {
    fn domain(&self) -> &str {
        "com.example.checkout"
    }

    fn code(&self) -> i64 {
        42
    }

    fn user_info(&self) -> Option<AnalyticsErrorInfo> {
        Some(AnalyticsErrorInfo::new(
            "Payment declined",
            Some("card expired".into()),
            Some("use another card".into()),
        ))
    }
}

fn main() {
    let router = LogRouter::builder()
        .with_analytics_sink(AnalyticsExporter::default())
        .with_crash_sink(CrashExporter::default())
        .build();

    // Setup Log Appender for the log crate.
    AnalyticsLogBridge::new(router).init().unwrap();

    emit::record_screen_view("Home", "HomeViewController");
    emit::record_event(&Event::new("purchase").with_attribute("item", "widget"));
    emit::record_error(&CheckoutError);
    emit::log_error(&std::io::Error::other("disk full"));

    // Events can also be logged with the log macros directly.
    let fruit = "apple";
    info!(target: "AnalyticsEvent", fruit; "add_to_cart");

    // Plain lines are dropped, error lines without a payload too.
    warn!("warn!");
    error!("error without a payload");
}

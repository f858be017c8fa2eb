//! Bridges the [`tracing`](https://docs.rs/tracing/latest/tracing/) crate to log-analytics.
//!
//! [`layer::AnalyticsTracingBridge`] is a
//! [`Layer`](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/trait.Layer.html)
//! that turns `tracing` events into [`log_analytics::LogRecord`]s and routes
//! them, so it can sit next to other layers such as `fmt`.
//!
//! ## Getting Started
//!
//! ```
//! use log_analytics::LogRouter;
//! use log_analytics_appender_tracing::layer::AnalyticsTracingBridge;
//! use tracing_subscriber::prelude::*;
//!
//! let bridge = AnalyticsTracingBridge::new(LogRouter::builder().build());
//! let subscriber = tracing_subscriber::registry().with(bridge);
//!
//! tracing::subscriber::with_default(subscriber, || {
//!     // An analytics event: the message is the event name.
//!     tracing::info!(target: "AnalyticsEvent", item = "widget", "purchase");
//!     // A screen view.
//!     tracing::info!(target: "AnalyticsScreen", screenName = "Home", screenClass = "HomeViewController", "Screen View");
//!     // An error report carries the error keys as fields.
//!     tracing::error!(domain = "NSURLErrorDomain", code = -1009, "request failed");
//! });
//! ```
//!
//! ## Mapping details
//!
//! | `tracing`  | log-analytics | Notes |
//! |------------|---------------|-------|
//! | target     | source tag    | module paths are plain records |
//! | level      | [`Level`]     | `WARN` maps to `Warning` |
//! | `message`  | message       | |
//! | fields     | metadata      | Strings are stored as is, other values with their `Debug` or `Display` form |
//!
//! Events whose target starts with `log-analytics` are never routed.
//!
//! [`Level`]: log_analytics::Level
#![warn(missing_debug_implementations, missing_docs)]

pub mod layer;

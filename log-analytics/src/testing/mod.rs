//! In-memory sinks for tests.
//!
//! Enabled by the `testing` feature.
mod in_memory_sink;

pub use in_memory_sink::{EmittedEvent, InMemoryAnalyticsSink, InMemoryCrashSink};

use crate::event::AnalyticsScreen;
use crate::metadata::{Metadata, MetadataCodec};
use crate::report::ErrorDescriptor;
use crate::source::Source;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a log record, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Finest-grained tracing output.
    Trace,
    /// Debugging output.
    Debug,
    /// Informational messages. Analytics events and screen views use this level.
    #[default]
    Info,
    /// Normal but significant conditions.
    Notice,
    /// Potential problems.
    Warning,
    /// Errors. Records at this level are treated as error reports.
    Error,
    /// Critical failures. Records at this level are treated as error reports.
    Critical,
}

impl Level {
    /// Lowercase name of the level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }

    /// Returns true for the levels that make a record an error report by
    /// themselves.
    pub const fn is_error(&self) -> bool {
        matches!(self, Level::Error | Level::Critical)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown log level {0:?}, expected one of trace, debug, info, notice, warning, error, critical")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "notice" => Ok(Level::Notice),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

/// One log call, as handed over by an appender.
///
/// Records only live for the duration of a single [`route`](crate::LogRouter::route)
/// call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    level: Level,
    message: String,
    source: Cow<'static, str>,
    metadata: Metadata,
}

impl LogRecord {
    /// Starts a record at the given level.
    pub fn builder(level: Level) -> LogRecordBuilder {
        LogRecordBuilder {
            record: LogRecord {
                level,
                message: String::new(),
                source: Cow::Borrowed(""),
                metadata: Metadata::new(),
            },
        }
    }

    /// Severity.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Free-form source tag, e.g. a module path or one of the [`Source`] tags.
    pub fn source_tag(&self) -> &str {
        &self.source
    }

    /// The analytics source this record was tagged with, if any.
    pub fn source(&self) -> Option<Source> {
        Source::from_tag(&self.source)
    }

    /// Attached metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Builder for [`LogRecord`].
#[derive(Debug)]
pub struct LogRecordBuilder {
    record: LogRecord,
}

impl LogRecordBuilder {
    /// Sets the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Sets a free-form source tag.
    pub fn source_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.record.source = tag.into();
        self
    }

    /// Tags the record with an analytics source.
    pub fn source(self, source: Source) -> Self {
        self.source_tag(source.as_str())
    }

    /// Replaces the metadata.
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.record.metadata = metadata;
        self
    }

    /// Adds one metadata entry.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.record.metadata.insert(key, value);
        self
    }

    /// Finishes the record.
    pub fn build(self) -> LogRecord {
        self.record
    }
}

/// What a record turns out to be once classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// An ordinary log line. Nothing is dispatched for it.
    Plain,
    /// A named event for the analytics sink.
    AnalyticsEvent {
        /// Event name.
        name: String,
        /// Event parameters, exactly as attached to the record.
        attributes: Metadata,
    },
    /// A screen view for the analytics sink.
    ScreenView(AnalyticsScreen),
    /// An error for the crash sink.
    ErrorReport(ErrorDescriptor),
}

impl RecordKind {
    /// Classifies a record. The first matching rule wins:
    ///
    /// 1. source tag `AnalyticsEvent`: an event named after the message.
    /// 2. source tag `AnalyticsScreen`: a screen view decoded from the metadata.
    /// 3. source tag `AnalyticsError`, or level `Error`/`Critical`: an error
    ///    report decoded from the metadata.
    /// 4. anything else is [`RecordKind::Plain`].
    ///
    /// Returns `None` when rule 3 matches but the metadata carries no error
    /// payload, i.e. `domain` or `code` is missing.
    pub fn classify(record: &LogRecord) -> Option<RecordKind> {
        match record.source() {
            Some(Source::AnalyticsEvent) => Some(RecordKind::AnalyticsEvent {
                name: record.message.clone(),
                attributes: record.metadata.clone(),
            }),
            Some(Source::AnalyticsScreen) => Some(RecordKind::ScreenView(
                AnalyticsScreen::decode(&record.metadata),
            )),
            Some(Source::AnalyticsError) => {
                ErrorDescriptor::try_decode(&record.metadata).map(RecordKind::ErrorReport)
            }
            None if record.level.is_error() => {
                ErrorDescriptor::try_decode(&record.metadata).map(RecordKind::ErrorReport)
            }
            None => Some(RecordKind::Plain),
        }
    }
}

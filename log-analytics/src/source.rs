use std::fmt;

/// Source tags that mark a record as analytics traffic.
///
/// The façades carry these as the record target. Any other target, such as a
/// module path, is an ordinary log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// A structured error to hand to the crash sink.
    AnalyticsError,
    /// A named analytics event.
    AnalyticsEvent,
    /// A screen view.
    AnalyticsScreen,
}

impl Source {
    /// Every source, in classification order.
    pub const ALL: [Source; 3] = [
        Source::AnalyticsEvent,
        Source::AnalyticsScreen,
        Source::AnalyticsError,
    ];

    /// The tag as written on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Source::AnalyticsError => "AnalyticsError",
            Source::AnalyticsEvent => "AnalyticsEvent",
            Source::AnalyticsScreen => "AnalyticsScreen",
        }
    }

    /// Matches a raw tag exactly. Case and whitespace are significant.
    pub fn from_tag(tag: &str) -> Option<Source> {
        Source::ALL.into_iter().find(|source| source.as_str() == tag)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Error reports: the flat error shape handed to a [`CrashSink`](crate::CrashSink),
//! and the two ways of producing one.
use crate::metadata::{keys, Metadata, MetadataCodec};
use std::error::Error;
use std::fmt;

/// Localized details attached to a structured error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsErrorInfo {
    /// Human readable description.
    pub description: String,
    /// Why the operation failed.
    pub failure_reason: Option<String>,
    /// What the user can do about it.
    pub recovery_suggestion: Option<String>,
}

impl AnalyticsErrorInfo {
    /// Creates the info block.
    pub fn new(
        description: impl Into<String>,
        failure_reason: Option<String>,
        recovery_suggestion: Option<String>,
    ) -> Self {
        AnalyticsErrorInfo {
            description: description.into(),
            failure_reason,
            recovery_suggestion,
        }
    }
}

/// An application error that knows its own domain and code.
///
/// Implement this for error types that should reach the crash sink with a
/// stable identity, then log them with the appender's `record_error`.
pub trait AnalyticsError {
    /// Error domain, e.g. `"com.example.checkout"`.
    fn domain(&self) -> &str;

    /// Code within the domain.
    fn code(&self) -> i64;

    /// Optional localized details.
    fn user_info(&self) -> Option<AnalyticsErrorInfo> {
        None
    }
}

/// The error shape delivered to crash sinks.
///
/// It round-trips through [`Metadata`] under the five keys in
/// [`keys::ERROR_KEYS`]. Absent optional fields are encoded as empty strings
/// and come back as `Some("")`: after one round trip "absent" and "empty" are
/// the same thing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
pub struct ErrorDescriptor {
    /// Error domain.
    pub domain: String,
    /// Code within the domain.
    pub code: i64,
    /// Human readable description.
    pub description: String,
    /// Why the operation failed.
    pub failure_reason: Option<String>,
    /// What the user can do about it.
    pub recovery_suggestion: Option<String>,
}

impl ErrorDescriptor {
    /// Creates a descriptor with no localized details.
    pub fn new(domain: impl Into<String>, code: i64) -> Self {
        ErrorDescriptor {
            domain: domain.into(),
            code,
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the failure reason.
    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }

    /// Sets the recovery suggestion.
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Builds a descriptor from any error value. Never fails.
    ///
    /// An `ErrorDescriptor` is copied as is. A [`std::io::Error`] reports the OS
    /// error code when there is one. Anything else is identified by its type
    /// name with code 0. The description is the error's `Display` output and
    /// the failure reason is its `source()`, if any.
    pub fn from_generic_error<E>(error: &E) -> Self
    where
        E: Error + 'static,
    {
        Self::describe(error, std::any::type_name::<E>())
    }

    /// Same as [`from_generic_error`](Self::from_generic_error) for an already
    /// erased error, as found behind a `Box<dyn Error>`.
    pub fn from_dyn_error(error: &(dyn Error + 'static)) -> Self {
        Self::describe(error, "dyn Error")
    }

    fn describe(error: &(dyn Error + 'static), type_name: &str) -> Self {
        if let Some(descriptor) = error.downcast_ref::<ErrorDescriptor>() {
            return descriptor.clone();
        }

        let (domain, code) = match error.downcast_ref::<std::io::Error>() {
            Some(io) => (
                std::any::type_name::<std::io::Error>().to_owned(),
                io.raw_os_error().map(i64::from).unwrap_or_default(),
            ),
            None => (type_name.to_owned(), 0),
        };

        ErrorDescriptor {
            domain,
            code,
            description: error.to_string(),
            failure_reason: error.source().map(|source| source.to_string()),
            recovery_suggestion: None,
        }
    }

    /// Builds a descriptor from a structured error, field for field.
    pub fn from_structured_error<E>(error: &E) -> Self
    where
        E: AnalyticsError + ?Sized,
    {
        let info = error.user_info().unwrap_or_default();
        ErrorDescriptor {
            domain: error.domain().to_owned(),
            code: error.code(),
            description: info.description,
            failure_reason: info.failure_reason,
            recovery_suggestion: info.recovery_suggestion,
        }
    }

    /// Decodes an error payload only if one was attached.
    ///
    /// Returns `None` unless both `domain` and `code` are present; their
    /// values then decode with the usual defaults.
    pub fn try_decode(metadata: &Metadata) -> Option<Self> {
        if metadata.contains_key(keys::DOMAIN) && metadata.contains_key(keys::CODE) {
            Some(Self::decode(metadata))
        } else {
            None
        }
    }
}

impl MetadataCodec for ErrorDescriptor {
    fn encode(&self) -> Metadata {
        Metadata::new()
            .with(keys::DOMAIN, self.domain.as_str())
            .with(keys::CODE, self.code.to_string())
            .with(keys::DESCRIPTION, self.description.as_str())
            .with(
                keys::FAILURE_REASON,
                self.failure_reason.as_deref().unwrap_or_default(),
            )
            .with(
                keys::RECOVERY_SUGGESTION,
                self.recovery_suggestion.as_deref().unwrap_or_default(),
            )
    }

    fn decode(metadata: &Metadata) -> Self {
        let optional = |key: &str| metadata.get(key).map(str::to_owned);

        ErrorDescriptor {
            domain: metadata.get(keys::DOMAIN).unwrap_or_default().to_owned(),
            code: metadata
                .get(keys::CODE)
                .and_then(|code| code.trim().parse().ok())
                .unwrap_or_default(),
            description: metadata
                .get(keys::DESCRIPTION)
                .unwrap_or_default()
                .to_owned(),
            failure_reason: optional(keys::FAILURE_REASON),
            recovery_suggestion: optional(keys::RECOVERY_SUGGESTION),
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.domain, self.code)
    }
}

impl Error for ErrorDescriptor {}

impl<E> From<&E> for ErrorDescriptor
where
    E: AnalyticsError,
{
    fn from(error: &E) -> Self {
        ErrorDescriptor::from_structured_error(error)
    }
}

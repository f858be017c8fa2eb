//! Errors surfaced by sink implementations outside the routing path.
//!
//! Routing itself never fails; see [`LogRouter::route`](crate::LogRouter::route).
use std::sync::PoisonError;
use thiserror::Error;

/// Errors returned by sink operations such as reading back captured data.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SinkError {
    /// The sink failed internally, e.g. a lock was poisoned by a panicking writer.
    #[error("Sink internal failure: {0}")]
    InternalFailure(String),
}

impl<T> From<PoisonError<T>> for SinkError {
    fn from(err: PoisonError<T>) -> Self {
        SinkError::InternalFailure(err.to_string())
    }
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

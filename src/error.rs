//! Error taxonomy and the explicit fallback result type
//!
//! Every stage of the routing core returns an [`Outcome`]. A stage never fails
//! outright: it either produces its value or a designated safe default together
//! with the reason the default was used.

use thiserror::Error;

/// Reasons a routing stage fell back to its safe default
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("request path is empty")]
    EmptyPath,

    #[error("request path does not start with '/': {path:?}")]
    MissingLeadingSlash { path: String },

    #[error("request descriptor is malformed: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    #[error("header {header} is {len} bytes, limit is {limit}")]
    HeaderTooLong {
        header: &'static str,
        len: usize,
        limit: usize,
    },

    #[error("invalid value for header {header}")]
    InvalidHeaderValue {
        header: &'static str,
        #[source]
        source: hyper::header::InvalidHeaderValue,
    },
}

/// Result of a routing stage: the computed value, or a fallback value plus its cause
#[derive(Debug)]
pub enum Outcome<T> {
    Value(T),
    Fallback { value: T, reason: RoutingError },
}

impl<T> Outcome<T> {
    pub const fn fallback(value: T, reason: RoutingError) -> Self {
        Self::Fallback { value, reason }
    }

    /// Borrow the carried value regardless of how it was produced
    pub const fn value(&self) -> &T {
        match self {
            Self::Value(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Value(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub const fn reason(&self) -> Option<&RoutingError> {
        match self {
            Self::Value(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Value(value) => Outcome::Value(f(value)),
            Self::Fallback { value, reason } => Outcome::Fallback {
                value: f(value),
                reason,
            },
        }
    }
}

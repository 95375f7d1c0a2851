//! Error types for the ad-fetch subsystem.
//!
//! Internal failures are converted to typed values at the executor boundary;
//! raw transport or parse errors never cross into the surface's serialized
//! context. The surface only ever sees an [`ErrorReason`].

use std::fmt;
use thiserror::Error;

/// Public failure reason reported to the display surface.
///
/// This is the external error taxonomy. Internal outcomes map onto it as
/// follows: cancellation maps to `Cancelled`, both retryable and terminal
/// server errors map to `ServerError`, empty inventory and warm-up map to
/// `NoFill`, and transport or parse failures with no other classification
/// map to `Unspecified`. `AdapterNotFound` is produced at dispatch time when
/// a custom event names no registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    /// The fetch was cancelled before a result could be applied.
    Cancelled,
    /// The ad server returned an error response.
    ServerError,
    /// The ad server had no inventory for the ad unit.
    NoFill,
    /// A custom event named a handler that is not registered.
    AdapterNotFound,
    /// An unclassified transport or parse failure.
    Unspecified,
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorReason::Cancelled => "CANCELLED",
            ErrorReason::ServerError => "SERVER_ERROR",
            ErrorReason::NoFill => "NO_FILL",
            ErrorReason::AdapterNotFound => "ADAPTER_NOT_FOUND",
            ErrorReason::Unspecified => "UNSPECIFIED",
        };
        write!(f, "{}", label)
    }
}

/// Failures raised while performing a fetch.
///
/// All variants map to [`ErrorReason::Unspecified`] when reported to the
/// surface; the distinction exists for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The HTTP request failed at the transport level.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured connect/read timeout.
    #[error("request timed out")]
    Timeout,

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// A response header carried a value that does not parse.
    #[error("malformed {header} header: {value:?}")]
    MalformedHeader {
        /// Name of the offending header.
        header: &'static str,
        /// Raw value received from the server.
        value: String,
    },
}

/// Failures raised by a surface's custom-event bridge.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// No handler is registered under the requested name.
    #[error("no registered handler for custom event {0:?}")]
    NotFound(String),

    /// A handler was found but failed to run the event.
    #[error("custom event handler failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reason_display() {
        assert_eq!(ErrorReason::Cancelled.to_string(), "CANCELLED");
        assert_eq!(ErrorReason::ServerError.to_string(), "SERVER_ERROR");
        assert_eq!(ErrorReason::NoFill.to_string(), "NO_FILL");
        assert_eq!(ErrorReason::AdapterNotFound.to_string(), "ADAPTER_NOT_FOUND");
        assert_eq!(ErrorReason::Unspecified.to_string(), "UNSPECIFIED");
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = FetchError::MalformedHeader {
            header: "X-Width",
            value: "wide".to_string(),
        };
        assert_eq!(err.to_string(), "malformed X-Width header: \"wide\"");
    }

    #[test]
    fn test_adapter_error_display() {
        let err = AdapterError::NotFound("onBannerTapped".to_string());
        assert_eq!(
            err.to_string(),
            "no registered handler for custom event \"onBannerTapped\""
        );
    }
}

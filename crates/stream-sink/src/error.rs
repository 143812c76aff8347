//! Error types for stream sinks.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while submitting a payload to a stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The sink rejected the payload or could not be reached
    /// (authentication, throttling, network, service unavailable).
    #[error("Failed to put record to stream '{stream}': {message}")]
    Transmission { stream: String, message: String },

    /// The submit did not complete within the allotted time.
    #[error("Put record to stream '{stream}' timed out after {timeout:?}")]
    Timeout { stream: String, timeout: Duration },
}

impl SinkError {
    pub fn transmission(stream: &str, message: impl Into<String>) -> Self {
        SinkError::Transmission {
            stream: stream.to_string(),
            message: message.into(),
        }
    }

    pub fn timeout(stream: &str, timeout: Duration) -> Self {
        SinkError::Timeout {
            stream: stream.to_string(),
            timeout,
        }
    }
}

//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Transport layer error types.
//!
//! Transport errors describe a failure to complete an HTTP exchange at all.
//! A response carrying an error status is not a transport error; it reaches
//! the client proxy as a normal response.
//!
//! # Recovery Strategy
//!
//! Errors reported as recoverable by [`TransportError::is_recoverable`] are
//! retried according to the client's backoff strategy. Everything else
//! fails the call immediately.

use std::io;
use thiserror::Error;

/// Errors that can occur while exchanging a request with a server.
///
/// # Examples
///
/// ```rust
/// use restwire::transport::TransportError;
/// use std::io;
///
/// let error = TransportError::ConnectionFailed {
///     address: "127.0.0.1:8080".to_string(),
///     source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
/// };
///
/// if error.is_recoverable() {
///     println!("Can retry the call");
/// }
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to establish a connection to the server.
    #[error("failed to connect to {address}: {source}")]
    ConnectionFailed {
        /// The address that failed to connect
        address: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The connection was lost before a response arrived.
    #[error("connection lost: {reason}")]
    ConnectionLost {
        /// Description of why the connection was lost
        reason: String,
        /// The underlying I/O error, if available
        #[source]
        source: Option<io::Error>,
    },

    /// The exchange did not complete in time.
    #[error("operation timed out after {duration:?}")]
    Timeout {
        /// The duration that was exceeded
        duration: std::time::Duration,
    },

    /// The request could not be built or sent as described.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Description of the problem
        reason: String,
    },

    /// Invalid transport configuration.
    ///
    /// This indicates a programming error and is never retried.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
    },

    /// The server spoke something other than well formed HTTP.
    #[error("protocol error: {reason}")]
    Protocol {
        /// Description of the protocol violation
        reason: String,
    },

    /// Transport is already closed.
    #[error("transport is closed")]
    Closed,

    /// An unexpected I/O error occurred.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    /// Returns `true` if retrying the exchange may succeed.
    ///
    /// Connection failures, lost connections, timeouts and transient I/O
    /// errors are recoverable. Configuration errors, malformed requests,
    /// protocol errors and closed transports are not.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use restwire::transport::TransportError;
    /// use std::time::Duration;
    ///
    /// assert!(TransportError::Timeout { duration: Duration::from_secs(1) }.is_recoverable());
    /// assert!(!TransportError::Closed.is_recoverable());
    /// ```
    pub fn is_recoverable(&self) -> bool {
        match self {
            TransportError::ConnectionFailed { .. }
            | TransportError::ConnectionLost { .. }
            | TransportError::Timeout { .. } => true,

            TransportError::Io { source } => matches!(
                source.kind(),
                io::ErrorKind::Interrupted
                    | io::ErrorKind::WouldBlock
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
            ),

            TransportError::InvalidRequest { .. }
            | TransportError::InvalidConfiguration { .. }
            | TransportError::Protocol { .. }
            | TransportError::Closed => false,
        }
    }

    /// Create a connection failed error.
    pub fn connection_failed(address: impl Into<String>) -> Self {
        TransportError::ConnectionFailed {
            address: address.into(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        }
    }

    /// Create a connection lost error.
    pub fn connection_lost(reason: impl Into<String>) -> Self {
        TransportError::ConnectionLost {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        TransportError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(error: io::Error) -> Self {
        TransportError::Io { source: error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_connection_failed_is_recoverable() {
        let error = TransportError::ConnectionFailed {
            address: "127.0.0.1:8080".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert!(error.is_recoverable());
        assert!(error.to_string().contains("127.0.0.1:8080"));
    }

    #[test]
    fn test_connection_lost_is_recoverable() {
        assert!(TransportError::connection_lost("peer closed").is_recoverable());
    }

    #[test]
    fn test_timeout_is_recoverable() {
        let error = TransportError::Timeout {
            duration: Duration::from_secs(30),
        };
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_invalid_configuration_not_recoverable() {
        let error = TransportError::invalid_configuration("invalid pool size");
        assert!(!error.is_recoverable());
        assert_eq!(error.to_string(), "invalid configuration: invalid pool size");
    }

    #[test]
    fn test_request_and_protocol_errors_not_recoverable() {
        let request = TransportError::InvalidRequest {
            reason: "bad header".to_string(),
        };
        let protocol = TransportError::Protocol {
            reason: "truncated response".to_string(),
        };
        assert!(!request.is_recoverable());
        assert!(!protocol.is_recoverable());
        assert!(!TransportError::Closed.is_recoverable());
    }

    #[test]
    fn test_io_error_classification() {
        let transient: TransportError = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(transient.is_recoverable());

        let permanent: TransportError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(!permanent.is_recoverable());
    }
}

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

//! Client call error types.

use crate::binding::ArgumentError;
use crate::codec::{DeserializationError, MediaError, SerializationError};
use crate::transport::TransportError;
use crate::wire::ErrorPayload;
use http::StatusCode;
use thiserror::Error;

/// Errors returned by a single client call.
///
/// Generated clients convert this into the error type of each trait method
/// through `From<ClientError>`.
///
/// # Examples
///
/// ```rust
/// use restwire::client::ClientError;
/// use restwire::wire::ErrorPayload;
/// use http::StatusCode;
///
/// let error = ClientError::Remote {
///     status: StatusCode::NOT_FOUND,
///     payload: ErrorPayload::new("NotFound", "no such profile"),
/// };
/// assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
/// assert_eq!(error.payload().unwrap().code, "NotFound");
/// ```
#[derive(Debug, Error)]
pub enum ClientError {
    /// The interface has no route for the invoked method.
    #[error("interface `{interface}` has no route for method `{method}`")]
    UnsupportedMethod {
        /// The bound interface
        interface: String,
        /// The invoked method
        method: String,
    },

    /// An argument could not be placed in the request URI.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// An argument or the request body could not be encoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The response body could not be decoded into the declared type.
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),

    /// No codec matches the request or response media type.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// The exchange itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with an error status and a structured payload.
    #[error("remote error {status}: {payload}")]
    Remote {
        /// The response status
        status: StatusCode,
        /// The decoded error payload
        payload: ErrorPayload,
    },

    /// The server answered with an error status and an unstructured body.
    #[error("http status {status}")]
    Status {
        /// The response status
        status: StatusCode,
        /// The raw response body, lossily decoded as UTF-8
        body: String,
    },
}

impl ClientError {
    /// The HTTP status, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Remote { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The structured error payload, if the server sent one.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Remote { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Returns `true` if the failure came from the transport and retrying
    /// the call may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_recoverable())
    }

    /// Returns `true` for 4xx answers.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_client_error())
    }

    /// Returns `true` for 5xx answers.
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let error = ClientError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "down".to_string(),
        };
        assert!(error.is_server_error());
        assert!(!error.is_client_error());
        assert!(error.payload().is_none());
        assert_eq!(error.to_string(), "http status 503 Service Unavailable");
    }

    #[test]
    fn test_transport_recoverability() {
        let error = ClientError::from(TransportError::connection_failed("host:80"));
        assert!(error.is_recoverable());
        assert_eq!(error.status(), None);

        let error = ClientError::from(TransportError::Closed);
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_argument_error_is_transparent() {
        let error = ClientError::from(ArgumentError::MissingPathVariable {
            name: "id".to_string(),
        });
        assert_eq!(error.to_string(), "path variable `id` has no value");
    }
}

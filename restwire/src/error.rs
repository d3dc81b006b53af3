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


//! Top-level error type for RESTWire.
//!
//! Each layer has its own error type. [`Error`] composes them so that
//! application code can use a single type with `?`:
//!
//! | Layer | Type | When |
//! |-------|------|------|
//! | Binding | [`BindingError`] | building a client or registry, always fatal |
//! | Client | [`ClientError`] | one client call |
//! | Dispatch | [`DispatchError`] | one inbound request |
//! | Transport | [`TransportError`] | one exchange, possibly retryable |
//! | Codec | [`MediaError`] | media type negotiation |
//!
//! # Examples
//!
//! ```rust
//! use restwire::Error;
//! use restwire::binding::BindingError;
//! use restwire::transport::TransportError;
//! use std::time::Duration;
//!
//! let error: Error = BindingError::DuplicateBody { method: "put".to_string() }.into();
//! assert!(error.is_binding_error());
//! assert!(!error.is_retryable());
//!
//! let error: Error = TransportError::Timeout { duration: Duration::from_secs(5) }.into();
//! assert!(error.is_retryable());
//! ```

use crate::backoff::BackoffError;
use crate::binding::BindingError;
use crate::client::ClientError;
use crate::codec::MediaError;
use crate::observability::RequestVectorError;
use crate::server::DispatchError;
use crate::transport::TransportError;
use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for RESTWire operations.
#[derive(Debug)]
pub enum Error {
    /// A route table or registry could not be bound.
    Binding(BindingError),

    /// A client call failed.
    Client(ClientError),

    /// An inbound request could not be served.
    Dispatch(DispatchError),

    /// The transport failed or is misconfigured.
    Transport(TransportError),

    /// A backoff strategy was given invalid parameters.
    Backoff(BackoffError),

    /// Media type negotiation failed.
    Media(MediaError),

    /// A request vector could not be parsed.
    RequestVector(RequestVectorError),
}

impl Error {
    #[must_use]
    pub const fn is_binding_error(&self) -> bool {
        matches!(self, Self::Binding(_))
    }

    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    #[must_use]
    pub const fn is_dispatch_error(&self) -> bool {
        matches!(self, Self::Dispatch(_))
    }

    #[must_use]
    pub const fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if repeating the operation may succeed.
    ///
    /// Only transport failures are retryable. HTTP error statuses and
    /// binding errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_recoverable(),
            Self::Client(e) => e.is_recoverable(),
            _ => false,
        }
    }

    /// Returns `true` for errors raised while constructing clients,
    /// registries, or strategies.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Self::Binding(_) | Self::Backoff(_) => true,
            Self::Transport(TransportError::InvalidConfiguration { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binding(e) => write!(f, "binding error: {}", e),
            Self::Client(e) => write!(f, "client error: {}", e),
            Self::Dispatch(e) => write!(f, "dispatch error: {}", e),
            Self::Transport(e) => write!(f, "transport error: {}", e),
            Self::Backoff(e) => write!(f, "backoff error: {}", e),
            Self::Media(e) => write!(f, "media error: {}", e),
            Self::RequestVector(e) => write!(f, "request vector error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Binding(e) => Some(e),
            Self::Client(e) => Some(e),
            Self::Dispatch(e) => Some(e),
            Self::Transport(e) => Some(e),
            Self::Backoff(e) => Some(e),
            Self::Media(e) => Some(e),
            Self::RequestVector(e) => Some(e),
        }
    }
}

impl From<BindingError> for Error {
    fn from(error: BindingError) -> Self {
        Self::Binding(error)
    }
}

impl From<ClientError> for Error {
    fn from(error: ClientError) -> Self {
        Self::Client(error)
    }
}

impl From<DispatchError> for Error {
    fn from(error: DispatchError) -> Self {
        Self::Dispatch(error)
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl From<BackoffError> for Error {
    fn from(error: BackoffError) -> Self {
        Self::Backoff(error)
    }
}

impl From<MediaError> for Error {
    fn from(error: MediaError) -> Self {
        Self::Media(error)
    }
}

impl From<RequestVectorError> for Error {
    fn from(error: RequestVectorError) -> Self {
        Self::RequestVector(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_classification() {
        let error = Error::from(BindingError::DuplicateRoute {
            method: "a".to_string(),
        });
        assert!(error.is_binding_error());
        assert!(error.is_configuration_error());
        assert!(!error.is_transport_error());

        let error = Error::from(ClientError::UnsupportedMethod {
            interface: "I".to_string(),
            method: "m".to_string(),
        });
        assert!(error.is_client_error());
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_retryable() {
        let timeout = Error::from(TransportError::Timeout {
            duration: Duration::from_secs(1),
        });
        assert!(timeout.is_retryable());

        let wrapped = Error::from(ClientError::from(TransportError::connection_failed("h:1")));
        assert!(wrapped.is_retryable());

        let closed = Error::from(TransportError::Closed);
        assert!(!closed.is_retryable());
    }

    #[test]
    fn test_display_and_source() {
        let error = Error::from(MediaError::MissingContentType);
        assert!(error.to_string().starts_with("media error:"));
        assert!(error.source().is_some());

        let error = Error::from(TransportError::invalid_configuration("bad"));
        assert!(error.is_configuration_error());
        assert!(error.to_string().contains("transport error"));
    }
}

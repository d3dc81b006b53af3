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


//! Dispatch error types.

use crate::codec::{DeserializationError, MediaError, SerializationError};
use crate::server::ServiceError;
use crate::wire::ErrorPayload;
use http::{Method, StatusCode};
use thiserror::Error;

/// Per-request failures of the dispatcher.
///
/// Every variant is turned into a response; none escapes
/// [`HttpDispatcher::dispatch`](crate::server::HttpDispatcher::dispatch).
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request used a verb other than `POST`.
    #[error("method {verb} not allowed")]
    MethodNotAllowed {
        /// The rejected verb
        verb: Method,
    },

    /// The request body is larger than the configured limit.
    #[error("request body of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge {
        /// Received size, or the first size known to exceed the limit
        /// when the body was streamed
        size: usize,
        /// Configured limit
        limit: usize,
    },

    /// The request body could not be read from the connection.
    #[error("request body could not be read: {reason}")]
    UnreadableBody {
        /// The read failure
        reason: String,
    },

    /// The `Content-Type` is missing, malformed or unsupported.
    #[error(transparent)]
    UnsupportedMediaType(MediaError),

    /// No method is registered under the requested name.
    #[error("no method named `{method}`")]
    NotFound {
        /// The requested wire name
        method: String,
    },

    /// No codec reads the method's input type from the request media type.
    #[error("no codec reads the input of `{method}`: {source}")]
    NoReader {
        /// The resolved method
        method: String,
        /// The selection failure
        #[source]
        source: MediaError,
    },

    /// The request body could not be decoded into the method's input.
    #[error("bad request body for `{method}`: {source}")]
    BadRequest {
        /// The resolved method
        method: String,
        /// The decoding failure
        #[source]
        source: DeserializationError,
    },

    /// The method returned a domain error.
    #[error("`{method}` failed: {source}")]
    Service {
        /// The resolved method
        method: String,
        /// The service's error
        #[source]
        source: ServiceError,
    },

    /// The method panicked or its result could not be converted.
    #[error("internal error in `{method}`")]
    Internal {
        /// The resolved method
        method: String,
        /// The conversion failure, absent after a panic
        #[source]
        source: Option<SerializationError>,
    },

    /// No codec writes the result in any accepted media type.
    #[error("result of `{method}` cannot be encoded: {source}")]
    NotAcceptable {
        /// The resolved method
        method: String,
        /// The negotiation failure
        #[source]
        source: MediaError,
    },
}

impl DispatchError {
    /// The response status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::UnreadableBody { .. } => StatusCode::BAD_REQUEST,
            Self::Service { source, .. } => source.status(),
            Self::NoReader { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
        }
    }

    /// Returns `true` if the failure is the server's fault.
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// The wire form sent to the caller.
    ///
    /// Internal failures carry a generic message only.
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            Self::MethodNotAllowed { verb } => {
                ErrorPayload::new("MethodNotAllowed", self.to_string())
                    .with_parameter("verb", verb.as_str())
            }
            Self::PayloadTooLarge { limit, .. } => {
                ErrorPayload::new("PayloadTooLarge", self.to_string())
                    .with_parameter("limit", limit.to_string())
            }
            Self::UnreadableBody { .. } => ErrorPayload::new("BadRequest", self.to_string()),
            Self::UnsupportedMediaType(e) => ErrorPayload::new("UnsupportedMediaType", e.to_string()),
            Self::NotFound { method } => {
                ErrorPayload::new("NotFound", self.to_string()).with_parameter("method", method)
            }
            Self::BadRequest { method, source } => {
                ErrorPayload::new("BadRequest", source.message()).with_parameter("method", method)
            }
            Self::Service { source, .. } => source.to_payload(),
            Self::NoReader { method, .. } | Self::Internal { method, .. } => {
                ErrorPayload::new("InternalError", "internal server error")
                    .with_parameter("method", method)
            }
            Self::NotAcceptable { method, source } => {
                ErrorPayload::new("NotAcceptable", source.to_string())
                    .with_parameter("method", method)
            }
        }
    }
}

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


//! Errors raised by service implementations.

use crate::wire::{ErrorParameter, ErrorPayload};
use http::StatusCode;
use std::fmt;

/// Category of a [`ServiceError`], which decides the response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller sent an argument the service rejects (400).
    InvalidArgument,
    /// The operation is not supported by this implementation (501).
    Unsupported,
    /// The caller may not perform the operation (403).
    AccessDenied,
    /// Anything else (500).
    Uncategorized,
}

impl ErrorKind {
    /// The HTTP status reported for this kind.
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Unsupported => StatusCode::NOT_IMPLEMENTED,
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::Uncategorized => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The wire code used when a service does not choose its own.
    pub fn default_code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::Unsupported => "Unsupported",
            Self::AccessDenied => "AccessDenied",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

/// A domain error returned by a service method.
///
/// Service methods return `Result<T, E>` where `E: Into<ServiceError>`.
/// The dispatcher turns the error into an [`ErrorPayload`] and a status
/// chosen by its [`ErrorKind`].
///
/// # Examples
///
/// ```rust
/// use restwire::server::{ErrorKind, ServiceError};
/// use http::StatusCode;
///
/// let error = ServiceError::invalid_argument("person must not be empty")
///     .with_code("EmptyPerson")
///     .with_parameter("field", "person");
///
/// assert_eq!(error.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(error.status(), StatusCode::BAD_REQUEST);
///
/// let payload = error.to_payload();
/// assert_eq!(payload.code, "EmptyPerson");
/// assert_eq!(payload.parameter("field"), Some("person"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError {
    kind: ErrorKind,
    code: String,
    message: String,
    parameters: Vec<ErrorParameter>,
    inner: Vec<ErrorPayload>,
}

impl ServiceError {
    /// Creates an error with the kind's default code.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: kind.default_code().to_string(),
            message: message.into(),
            parameters: Vec::new(),
            inner: Vec::new(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccessDenied, message)
    }

    pub fn uncategorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Uncategorized, message)
    }

    /// Wraps an arbitrary error without exposing its message.
    ///
    /// Only the error's type name reaches the caller.
    pub fn uncategorized_from<E>(_error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let name = short_type_name(std::any::type_name::<E>());
        Self::uncategorized(format!("{} raised by service", name)).with_code(name)
    }

    /// Replaces the wire code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(ErrorParameter::new(key, value));
        self
    }

    /// Attaches a nested cause.
    pub fn with_inner(mut self, inner: ErrorPayload) -> Self {
        self.inner.push(inner);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The wire form of this error.
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code.clone(),
            message: self.message.clone(),
            parameters: self.parameters.clone(),
            inner_errors: self.inner.clone(),
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}

/// Last path segment of a type name, without generic arguments.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_kind_status() {
        assert_eq!(ErrorKind::InvalidArgument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Unsupported.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(ErrorKind::AccessDenied.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorKind::Uncategorized.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_uncategorized_hides_message() {
        let source = io::Error::other("password=hunter2");
        let error = ServiceError::uncategorized_from(&source);
        assert_eq!(error.kind(), ErrorKind::Uncategorized);
        assert_eq!(error.code(), "Error");
        assert!(!error.message().contains("hunter2"));
        assert_eq!(error.message(), "Error raised by service");
    }

    #[test]
    fn test_payload_carries_inner() {
        let error = ServiceError::access_denied("no")
            .with_inner(ErrorPayload::new("TokenExpired", "token expired"));
        let payload = error.to_payload();
        assert_eq!(payload.code, "AccessDenied");
        assert_eq!(payload.inner_errors.len(), 1);
        assert_eq!(error.to_string(), "AccessDenied: no");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("std::io::error::Error"), "Error");
        assert_eq!(short_type_name("my::Wrapper<other::Inner>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}

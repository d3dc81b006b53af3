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

//! Codec error types.
//!
//! Encoding and decoding failures carry a message and an optional source.
//! Media negotiation failures are reported separately through [`MediaError`]
//! so that the dispatcher can map them onto distinct HTTP statuses.

use std::fmt;
use thiserror::Error;

/// Error raised when a value cannot be encoded into a body.
///
/// # Examples
///
/// ```rust
/// use restwire::codec::SerializationError;
///
/// let error = SerializationError::new("objects cannot be written as text");
/// assert!(error.to_string().contains("objects cannot be written as text"));
/// ```
#[derive(Debug)]
pub struct SerializationError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SerializationError {
    /// Creates a new serialization error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new serialization error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the message without the underlying cause.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Serialization error: {}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error raised when a body cannot be decoded into a value.
#[derive(Debug)]
pub struct DeserializationError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DeserializationError {
    /// Creates a new deserialization error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new deserialization error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the message without the underlying cause.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DeserializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deserialization error: {}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DeserializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source("JSON serialization failed", err)
    }
}

impl From<serde_json::Error> for DeserializationError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source("JSON deserialization failed", err)
    }
}

/// Errors raised while negotiating media types for a body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// A body was present but no `Content-Type` header described it.
    #[error("request has a body but no content type")]
    MissingContentType,

    /// A header value could not be parsed as a media type.
    #[error("invalid media type `{value}`")]
    InvalidMediaType {
        /// The offending header value
        value: String,
    },

    /// No registered codec understands the media type.
    #[error("unsupported media type `{media_type}`")]
    UnsupportedMediaType {
        /// The media type that was offered
        media_type: String,
    },

    /// No codec can read the given type from the given media type.
    #[error("no codec can read `{type_name}` from `{media_type}`")]
    NoReader {
        /// Name of the target type
        type_name: String,
        /// Media type of the body
        media_type: String,
    },

    /// No codec can write the given type in any acceptable media type.
    #[error("no codec can write `{type_name}` as any of `{accepted}`")]
    NoWriter {
        /// Name of the source type
        type_name: String,
        /// The acceptable media types, comma separated
        accepted: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_serialization_error_new() {
        let error = SerializationError::new("test error");
        assert_eq!(error.to_string(), "Serialization error: test error");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_deserialization_error_with_source() {
        let source = std::io::Error::other("io error");
        let error = DeserializationError::with_source("test error", source);
        assert!(error.to_string().contains("test error"));
        assert!(error.to_string().contains("io error"));
        assert!(error.source().is_some());
        assert_eq!(error.message(), "test error");
    }

    #[test]
    fn test_from_json_error() {
        let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let error = DeserializationError::from(json_error);
        assert!(error.to_string().starts_with("Deserialization error: JSON"));
    }

    #[test]
    fn test_media_error_display() {
        let error = MediaError::NoReader {
            type_name: "u32".to_string(),
            media_type: "text/csv".to_string(),
        };
        assert_eq!(error.to_string(), "no codec can read `u32` from `text/csv`");
    }
}

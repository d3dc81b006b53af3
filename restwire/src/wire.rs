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

//! Wire level error payload.
//!
//! Every failed dispatch is answered with an [`ErrorPayload`] body, and
//! clients parse it back into [`ClientError::Remote`](crate::client::ClientError::Remote).
//!
//! ```json
//! {
//!   "code": "InvalidArgument",
//!   "message": "name must not be empty",
//!   "parameters": [{"key": "field", "value": "name"}],
//!   "innerErrors": []
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured error body exchanged between server and client.
///
/// # Examples
///
/// ```rust
/// use restwire::wire::ErrorPayload;
///
/// let payload = ErrorPayload::new("NotFound", "no method named `frobnicate`")
///     .with_parameter("method", "frobnicate");
///
/// let json = serde_json::to_string(&payload).unwrap();
/// assert!(json.contains("\"innerErrors\":[]"));
///
/// let decoded: ErrorPayload = serde_json::from_str(&json).unwrap();
/// assert_eq!(decoded, payload);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// Category code, such as `NotFound` or `InvalidArgument`.
    pub code: String,
    /// Human readable description.
    pub message: String,
    /// Additional key and value details.
    #[serde(default)]
    pub parameters: Vec<ErrorParameter>,
    /// Nested causes.
    #[serde(default)]
    pub inner_errors: Vec<ErrorPayload>,
}

impl ErrorPayload {
    /// Creates a payload without parameters or inner errors.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            parameters: Vec::new(),
            inner_errors: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(ErrorParameter::new(key, value));
        self
    }

    /// Appends a nested cause.
    pub fn with_inner(mut self, inner: ErrorPayload) -> Self {
        self.inner_errors.push(inner);
        self
    }

    /// Looks up a parameter value by key.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .and_then(|p| p.value.as_deref())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorPayload {}

/// One key and optional value attached to an [`ErrorPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorParameter {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ErrorParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// A parameter carrying only a key.
    pub fn key_only(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

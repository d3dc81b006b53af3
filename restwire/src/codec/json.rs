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

//! JSON codec implementation.
//!
//! The default codec for both client and server. It reads and writes any
//! type that serde can represent.

use crate::codec::{Codec, DeserializationError, MediaType, SerializationError};
use serde_json::Value;

/// Codec for `application/json` bodies.
///
/// # Examples
///
/// ```rust
/// use restwire::codec::{Codec, JsonCodec};
/// use serde_json::json;
///
/// let codec = JsonCodec::new().with_pretty_print();
/// let bytes = codec.write(&json!({"greeting": "Hello, World"})).unwrap();
/// assert!(String::from_utf8(bytes).unwrap().contains('\n'));
/// ```
#[derive(Clone, Debug)]
pub struct JsonCodec {
    pretty: bool,
    media_type: MediaType,
}

impl JsonCodec {
    /// Creates a compact JSON codec.
    pub fn new() -> Self {
        Self {
            pretty: false,
            media_type: MediaType::application_json(),
        }
    }

    /// Enables pretty-printed output.
    pub fn with_pretty_print(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Disables pretty-printed output.
    pub fn with_compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    fn read(&self, bytes: &[u8]) -> Result<Value, DeserializationError> {
        serde_json::from_slice(bytes).map_err(Into::into)
    }

    fn write(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        if self.pretty {
            serde_json::to_vec_pretty(value).map_err(Into::into)
        } else {
            serde_json::to_vec(value).map_err(Into::into)
        }
    }
}

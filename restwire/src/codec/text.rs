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

//! Plain text codec for scalar values.

use crate::codec::{Codec, DeserializationError, MediaType, SerializationError};
use serde_json::Value;

/// Type names that read naturally from a text body.
const STRING_TYPES: &[&str] = &[
    "alloc::string::String",
    "str",
    "&str",
    "char",
    "alloc::borrow::Cow<str>",
];

/// Type names that write naturally as a text body.
const SCALAR_TYPES: &[&str] = &[
    "bool", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128",
    "isize", "f32", "f64",
];

/// Codec for `text/plain` bodies.
///
/// Reads any body as a string and writes strings, numbers and booleans in
/// their display form. Structured values are refused.
#[derive(Clone, Debug)]
pub struct TextCodec {
    media_type: MediaType,
}

impl TextCodec {
    /// Creates a text codec.
    pub fn new() -> Self {
        Self {
            media_type: MediaType::text_plain(),
        }
    }
}

impl Default for TextCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for TextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    fn can_read(&self, type_name: &str, media_type: &MediaType) -> bool {
        self.supports(media_type) && STRING_TYPES.contains(&type_name)
    }

    fn can_write(&self, type_name: &str, media_type: &MediaType) -> bool {
        self.supports(media_type)
            && (STRING_TYPES.contains(&type_name) || SCALAR_TYPES.contains(&type_name))
    }

    fn read(&self, bytes: &[u8]) -> Result<Value, DeserializationError> {
        String::from_utf8(bytes.to_vec())
            .map(Value::String)
            .map_err(|e| DeserializationError::with_source("text body is not UTF-8", e))
    }

    fn write(&self, value: &Value) -> Result<Vec<u8>, SerializationError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::String(s) => Ok(s.clone().into_bytes()),
            Value::Bool(b) => Ok(b.to_string().into_bytes()),
            Value::Number(n) => Ok(n.to_string().into_bytes()),
            Value::Array(_) | Value::Object(_) => Err(SerializationError::new(
                "structured values cannot be written as text",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_scalars() {
        let codec = TextCodec::new();
        assert_eq!(codec.write(&json!("hi")).unwrap(), b"hi");
        assert_eq!(codec.write(&json!(7)).unwrap(), b"7");
        assert_eq!(codec.write(&json!(true)).unwrap(), b"true");
        assert!(codec.write(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_text_refuses_structures() {
        let codec = TextCodec::new();
        assert!(codec.write(&json!({"a": 1})).is_err());
        assert!(codec.write(&json!([1])).is_err());
    }

    #[test]
    fn test_text_read() {
        let codec = TextCodec::new();
        assert_eq!(codec.read(b"Hello").unwrap(), json!("Hello"));
        assert!(codec.read(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn test_text_type_gating() {
        let codec = TextCodec::new();
        let text = MediaType::text_plain();
        let string = std::any::type_name::<String>();
        assert!(codec.can_read(string, &text));
        assert!(codec.can_write("u64", &text));
        assert!(!codec.can_read("u64", &text));
        assert!(!codec.can_write("my_crate::Profile", &text));
        assert!(!codec.can_write(string, &MediaType::application_json()));
    }
}

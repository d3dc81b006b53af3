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

//! Codec trait definitions.

use crate::codec::{DeserializationError, MediaType, SerializationError};
use serde_json::Value;

/// Converts between body bytes and [`serde_json::Value`] for one media type.
///
/// Codecs work on the dynamic [`Value`] form so that they can be stored as
/// trait objects in a [`CodecRegistry`](crate::codec::CodecRegistry). The
/// typed conversion happens on either side through serde.
///
/// `can_read` and `can_write` receive the Rust type name of the value being
/// converted (from [`std::any::type_name`]) so that a codec can refuse types
/// it has no sensible representation for.
///
/// # Examples
///
/// ```rust
/// use restwire::codec::{Codec, JsonCodec, MediaType};
/// use serde_json::json;
///
/// let codec = JsonCodec::new();
/// assert!(codec.can_write("u32", &MediaType::application_json()));
///
/// let bytes = codec.write(&json!({"id": 7})).unwrap();
/// assert_eq!(codec.read(&bytes).unwrap(), json!({"id": 7}));
/// ```
pub trait Codec: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// The media type this codec produces.
    fn media_type(&self) -> &MediaType;

    /// Returns `true` if this codec handles the given media type.
    fn supports(&self, media_type: &MediaType) -> bool {
        self.media_type().matches(media_type)
    }

    /// Returns `true` if a value of `type_name` can be read from `media_type`.
    fn can_read(&self, _type_name: &str, media_type: &MediaType) -> bool {
        self.supports(media_type)
    }

    /// Returns `true` if a value of `type_name` can be written as `media_type`.
    fn can_write(&self, _type_name: &str, media_type: &MediaType) -> bool {
        self.supports(media_type)
    }

    /// Decodes a body.
    fn read(&self, bytes: &[u8]) -> Result<Value, DeserializationError>;

    /// Encodes a body.
    fn write(&self, value: &Value) -> Result<Vec<u8>, SerializationError>;
}

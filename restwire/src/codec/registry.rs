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

//! Ordered codec registry.

use crate::codec::{Codec, JsonCodec, MediaError, MediaType, TextCodec};
use std::fmt;
use std::sync::Arc;

/// An ordered list of codecs, searched first match wins.
///
/// # Examples
///
/// ```rust
/// use restwire::codec::{CodecRegistry, MediaType};
///
/// let codecs = CodecRegistry::default();
/// let accepted = vec![MediaType::any()];
/// let (codec, media) = codecs.negotiate_writer("u32", &accepted).unwrap();
/// assert_eq!(codec.name(), "json");
/// assert_eq!(media, MediaType::application_json());
/// ```
#[derive(Clone)]
pub struct CodecRegistry {
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Creates a registry holding JSON followed by plain text.
    pub fn with_defaults() -> Self {
        Self::new().with(JsonCodec::new()).with(TextCodec::new())
    }

    /// Appends a codec and returns the registry.
    pub fn with(mut self, codec: impl Codec) -> Self {
        self.push(Arc::new(codec));
        self
    }

    /// Appends a shared codec.
    pub fn push(&mut self, codec: Arc<dyn Codec>) {
        self.codecs.push(codec);
    }

    /// Returns `true` if no codecs are registered.
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Iterates over the codecs in search order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Codec>> {
        self.codecs.iter()
    }

    /// Returns `true` if any codec handles the media type.
    pub fn supports(&self, media_type: &MediaType) -> bool {
        self.codecs.iter().any(|codec| codec.supports(media_type))
    }

    /// First codec able to read `type_name` from `media_type`.
    pub fn reader_for(&self, type_name: &str, media_type: &MediaType) -> Option<&Arc<dyn Codec>> {
        self.codecs
            .iter()
            .find(|codec| codec.can_read(type_name, media_type))
    }

    /// First codec able to write `type_name` as `media_type`.
    pub fn writer_for(&self, type_name: &str, media_type: &MediaType) -> Option<&Arc<dyn Codec>> {
        self.codecs
            .iter()
            .find(|codec| codec.can_write(type_name, media_type))
    }

    /// Picks a writer for the first acceptable media type some codec can
    /// produce, returning the codec and the concrete media type to label the
    /// body with.
    pub fn negotiate_writer(
        &self,
        type_name: &str,
        accepted: &[MediaType],
    ) -> Result<(Arc<dyn Codec>, MediaType), MediaError> {
        for media_type in accepted {
            if let Some(codec) = self.writer_for(type_name, media_type) {
                let concrete = if media_type.is_wildcard() {
                    codec.media_type().clone()
                } else {
                    media_type.without_params()
                };
                return Ok((codec.clone(), concrete));
            }
        }
        Err(MediaError::NoWriter {
            type_name: type_name.to_string(),
            accepted: accepted
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Distinct media types of the registered codecs, in search order.
    pub fn readable_media_types(&self) -> Vec<MediaType> {
        let mut seen: Vec<MediaType> = Vec::new();
        for codec in &self.codecs {
            if !seen.contains(codec.media_type()) {
                seen.push(codec.media_type().clone());
            }
        }
        seen
    }

    /// Value for an `Accept` header listing every media type this registry
    /// can read.
    pub fn accept_header(&self) -> String {
        self.readable_media_types()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.codecs.iter().map(|codec| codec.name()))
            .finish()
    }
}

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

//! Body codecs for RESTWire.
//!
//! This module converts request and response bodies between bytes and
//! values. It is shared by the client proxy and the server dispatcher.
//!
//! # Overview
//!
//! - **[`Codec`] trait**: converts bytes to and from [`serde_json::Value`]
//! - **[`JsonCodec`]**: `application/json`, the default
//! - **[`TextCodec`]**: `text/plain` for strings and scalars
//! - **[`CodecRegistry`]**: ordered, first match wins
//! - **[`MediaType`]**: `Content-Type` and `Accept` parsing
//!
//! Typed values cross into the dynamic form with [`to_value`] and back out
//! with [`from_value`].
//!
//! # Examples
//!
//! ```rust
//! use restwire::codec::{from_value, to_value, Codec, JsonCodec};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Profile {
//!     id: u64,
//!     name: String,
//! }
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let codec = JsonCodec::new();
//! let profile = Profile { id: 7, name: "Ada".to_string() };
//!
//! let bytes = codec.write(&to_value(&profile)?)?;
//! let decoded: Profile = from_value(codec.read(&bytes)?)?;
//! assert_eq!(profile, decoded);
//! # Ok(())
//! # }
//! ```

mod error;
mod json;
mod media_type;
mod registry;
mod text;
mod traits;

pub use self::error::{DeserializationError, MediaError, SerializationError};
pub use self::json::JsonCodec;
pub use self::media_type::{MediaType, parse_accept};
pub use self::registry::CodecRegistry;
pub use self::text::TextCodec;
pub use self::traits::Codec;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Converts a typed value into its dynamic form.
pub fn to_value<T>(value: &T) -> Result<Value, SerializationError>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(Into::into)
}

/// Converts a dynamic value into a typed one.
pub fn from_value<T>(value: Value) -> Result<T, DeserializationError>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(Into::into)
}

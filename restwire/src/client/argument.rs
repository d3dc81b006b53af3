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


//! Argument conversion for generated clients.

use crate::client::ClientError;
use crate::codec::to_value;
use serde::Serialize;
use serde_json::Value;

/// Converts one call argument into the dynamic form a route renders.
///
/// # Examples
///
/// ```rust
/// use restwire::client::to_argument;
/// use serde_json::json;
///
/// assert_eq!(to_argument(&7u64).unwrap(), json!(7));
/// assert_eq!(to_argument(&None::<String>).unwrap(), json!(null));
/// ```
pub fn to_argument<T>(value: &T) -> Result<Value, ClientError>
where
    T: Serialize + ?Sized,
{
    Ok(to_value(value)?)
}

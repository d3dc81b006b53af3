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

//! HTTP transport layer for RESTWire clients.
//!
//! The transport moves one resolved request to a server and brings back the
//! complete response. Everything above it, URI building, body encoding,
//! retries and error decoding, lives in the client proxy.
//!
//! # Available Transports
//!
//! - **[`ReqwestTransport`]**: pooled HTTP/1.1 and HTTP/2 over the network
//!   (feature `reqwest`, on by default)
//! - **[`MemoryTransport`]**: hands requests to an in-process
//!   [`RequestHandler`], used for tests and embedding
//!
//! # Examples
//!
//! ```rust
//! use restwire::transport::{Credentials, TransportConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), restwire::transport::TransportError> {
//! let config = TransportConfig::new()
//!     .with_connection_ttl(Duration::from_secs(90))
//!     .with_max_pool_size(16)
//!     .with_credentials(Credentials::new("https://api.example.com", "svc", "secret")?);
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod credentials;
mod error;
mod memory;
#[cfg(feature = "reqwest")]
mod reqwest_transport;
mod traits;
mod types;

pub use self::config::{DEFAULT_MAX_POOL_SIZE, TransportConfig};
pub use self::credentials::{CredentialStore, Credentials, authority_key};
pub use self::error::TransportError;
pub use self::memory::MemoryTransport;
#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;
pub use self::traits::{HttpTransport, RequestHandler};
pub use self::types::{ExchangeRequest, ExchangeResponse};

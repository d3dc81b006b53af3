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


//! Client side of RESTWire.
//!
//! A client is a struct generated by `#[restwire::client]` that implements
//! the annotated trait by forwarding each call to a [`ClientProxy`]. The
//! proxy renders the route, encodes the body, performs one exchange and
//! decodes the answer.
//!
//! # Overview
//!
//! - **[`ClientFactory`]**: owns the transport, codecs and retry policy
//! - **[`BoundClient`]**: implemented by every generated client
//! - **[`ClientProxy`]**: the table-driven call interceptor
//! - **[`ClientError`]**: everything a single call can fail with
//!
//! # Examples
//!
//! ```rust,no_run
//! use restwire::client::{ClientError, ClientFactory};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Profile {
//!     pub id: u64,
//!     pub name: String,
//! }
//!
//! #[restwire::client]
//! pub trait Profiles {
//!     #[get("/profile/{id}")]
//!     async fn get_profile(&self, #[path("id")] id: u64) -> Result<Profile, ClientError>;
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ClientFactory::builder().build()?;
//! let profiles: ProfilesClient = factory.bind("http://host/api")?;
//! let profile = profiles.get_profile(7).await?;
//! println!("{}", profile.name);
//! # Ok(())
//! # }
//! ```

mod argument;
mod config;
mod error;
mod factory;
mod proxy;

pub use self::argument::to_argument;
pub use self::config::ClientConfig;
pub use self::error::ClientError;
pub use self::factory::{BoundClient, ClientFactory, ClientFactoryBuilder};
pub use self::proxy::ClientProxy;

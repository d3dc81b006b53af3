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


//! Server side of RESTWire.
//!
//! A service trait annotated with `#[restwire::rpc]` gets a `{Trait}Rpc`
//! wrapper that lists its methods as [`RpcMethodDecl`] rows. Those rows go
//! into an [`RpcRegistry`], and an [`HttpDispatcher`] serves the registry
//! over HTTP.
//!
//! # Dispatch
//!
//! Each request must be a `POST`. The method is named by the `method`
//! query parameter when present (`/rpc?method=sayHello`), else by the last
//! path segment (`/rpc/sayHello`). The body holds the single argument.
//!
//! | Failure | Status |
//! |---------|--------|
//! | verb other than `POST` | 405 |
//! | missing or unsupported `Content-Type` | 415 |
//! | unknown method | 404 |
//! | undecodable body | 400 |
//! | [`ErrorKind::InvalidArgument`] | 400 |
//! | [`ErrorKind::AccessDenied`] | 403 |
//! | [`ErrorKind::Unsupported`] | 501 |
//! | [`ErrorKind::Uncategorized`], panic | 500 |
//! | no codec for any accepted type | 406 |
//!
//! # Examples
//!
//! ```rust
//! use restwire::server::{HttpDispatcher, RpcRegistry, ServiceError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! pub struct HelloRequest {
//!     pub person: String,
//! }
//!
//! #[derive(Serialize)]
//! pub struct HelloResponse {
//!     pub greeting: String,
//! }
//!
//! #[restwire::rpc]
//! pub trait Greeter {
//!     async fn say_hello(&self, request: HelloRequest) -> Result<HelloResponse, ServiceError>;
//! }
//!
//! struct English;
//!
//! #[restwire::async_trait]
//! impl Greeter for English {
//!     async fn say_hello(&self, request: HelloRequest) -> Result<HelloResponse, ServiceError> {
//!         Ok(HelloResponse { greeting: format!("Hello, {}", request.person) })
//!     }
//! }
//!
//! let registry = RpcRegistry::builder()
//!     .service(GreeterRpc::new(English))
//!     .build()
//!     .unwrap();
//! assert!(registry.get("sayHello").is_some());
//! let dispatcher = HttpDispatcher::new(registry);
//! ```

#[cfg(feature = "axum")]
pub mod axum;
mod config;
mod dispatcher;
mod error;
mod method;
mod registry;
mod service_error;

pub use self::config::{DEFAULT_MAX_BODY_BYTES, DispatcherConfig};
pub use self::dispatcher::HttpDispatcher;
pub use self::error::DispatchError;
pub use self::method::{InvocationError, InvocationFuture, Invoker, RpcMethodDecl, RpcService};
pub use self::registry::{RpcRegistry, RpcRegistryBuilder};
pub use self::service_error::{ErrorKind, ServiceError};

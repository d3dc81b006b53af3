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

#![doc = include_str!("../../README.md")]
#![allow(clippy::module_inception)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

//! # RESTWire - Declarative REST Clients and RPC Dispatchers
//!
//! RESTWire removes hand-written HTTP plumbing from remote calls. A plain
//! trait describes the operations; the macros turn it into:
//!
//! - **a client** (`#[restwire::client]`) that maps every call onto one
//!   HTTP exchange, with routes, path and query parameters and an optional
//!   body declared on the trait
//! - **a server surface** (`#[restwire::rpc]`) that exposes every
//!   single-argument method of an implementation as `POST /<methodName>`
//!
//! ## Architecture
//!
//! - **[`binding`]**: route tables, URI templates, per-method descriptors
//! - **[`client`]**: factory, proxy and client errors
//! - **[`server`]**: method registry and HTTP dispatcher
//! - **[`codec`]**: body codecs and media type negotiation
//! - **[`backoff`]**: retry schedules for failed exchanges
//! - **[`transport`]**: the HTTP exchange abstraction and its implementations
//! - **[`observability`]**: request vectors and structured error logging
//! - **[`wire`]**: the error payload shared by client and server
//!
//! ## Quick Start
//!
//! ```rust
//! use restwire::client::{ClientError, ClientFactory};
//! use restwire::server::{HttpDispatcher, RpcRegistry, ServiceError};
//! use restwire::transport::MemoryTransport;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Serialize, Deserialize)]
//! pub struct HelloRequest {
//!     pub person: String,
//! }
//!
//! #[derive(Serialize, Deserialize)]
//! pub struct HelloResponse {
//!     pub greeting: String,
//! }
//!
//! #[restwire::rpc]
//! pub trait Greeter {
//!     async fn say_hello(&self, request: HelloRequest) -> Result<HelloResponse, ServiceError>;
//! }
//!
//! #[restwire::client]
//! pub trait GreeterApi {
//!     #[post("/sayHello")]
//!     async fn say_hello(&self, #[body] request: HelloRequest)
//!         -> Result<HelloResponse, ClientError>;
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
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = RpcRegistry::builder().service(GreeterRpc::new(English)).build()?;
//! let transport = Arc::new(MemoryTransport::new(Arc::new(HttpDispatcher::new(registry))));
//!
//! let factory = ClientFactory::builder().transport(transport).build()?;
//! let greeter: GreeterApiClient = factory.bind("http://local/rpc")?;
//!
//! let response = greeter
//!     .say_hello(HelloRequest { person: "Alice".to_string() })
//!     .await?;
//! assert_eq!(response.greeting, "Hello, Alice");
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **`derive`** (default): the `client` and `rpc` attribute macros
//! - **`reqwest`** (default): [`ReqwestTransport`](transport::ReqwestTransport)
//! - **`axum`**: mount a dispatcher in an axum router
//!
//! ## Error Handling
//!
//! Binding problems are reported when a client or registry is built, never
//! on a call. Per-call failures are [`ClientError`](client::ClientError)s on
//! the client and error payloads on the wire. [`Error`] composes every layer.
//!
//! ## Safety
//!
//! RESTWire is written in 100% safe Rust with `#![deny(unsafe_code)]`.

extern crate self as restwire;

pub mod backoff;
pub mod binding;
pub mod client;
pub mod codec;
pub mod error;
pub mod observability;
pub mod server;
pub mod transport;
pub mod wire;

#[cfg(feature = "derive")]
pub use restwire_macros::{client, rpc};

pub use async_trait::async_trait;
pub use error::Error;
pub use observability::log_error;

/// Items used by generated code. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use async_trait::async_trait;
    pub use http;
    pub use serde_json;
}

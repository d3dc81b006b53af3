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


//! # Greeter Example
//!
//! An RPC service and a client for it, generated from two traits and
//! connected through the in-memory transport.
//!
//! ## What This Example Shows
//!
//! - Publishing a service with `#[restwire::rpc]`
//! - Calling it through a `#[restwire::client]` trait
//! - Domain errors travelling back as structured payloads
//! - Request vectors linking the client call to the server log lines
//!
//! ## Running This Example
//!
//! ```bash
//! RUST_LOG=restwire=debug cargo run --example greeter
//! ```

use restwire::client::{ClientError, ClientFactory};
use restwire::observability::{RequestContext, RequestVector};
use restwire::server::{HttpDispatcher, RpcRegistry, ServiceError};
use restwire::transport::MemoryTransport;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloRequest {
    pub person: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub greeting: String,
}

/// The server side of the conversation.
#[restwire::rpc]
pub trait Greeter {
    async fn say_hello(&self, request: HelloRequest) -> Result<HelloResponse, ServiceError>;
}

/// The client side, routed onto the dispatcher's `POST /<methodName>` surface.
#[restwire::client]
pub trait GreeterApi {
    #[post("/sayHello")]
    async fn say_hello(&self, #[body] request: HelloRequest)
    -> Result<HelloResponse, ClientError>;
}

struct English;

#[restwire::async_trait]
impl Greeter for English {
    async fn say_hello(&self, request: HelloRequest) -> Result<HelloResponse, ServiceError> {
        if request.person.trim().is_empty() {
            return Err(ServiceError::invalid_argument("person must not be blank")
                .with_parameter("field", "person"));
        }
        tracing::info!(
            vector = ?RequestContext::current().map(|v| v.to_string()),
            "greeting {}",
            request.person
        );
        Ok(HelloResponse {
            greeting: format!("Hello, {}", request.person),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Greeter Example ===\n");

    let registry = RpcRegistry::builder()
        .service(GreeterRpc::new(English))
        .build()?;
    let dispatcher = HttpDispatcher::new(registry);
    let transport = Arc::new(MemoryTransport::new(Arc::new(dispatcher)));

    let factory = ClientFactory::builder().transport(transport).build()?;
    let greeter: GreeterApiClient = factory.bind("http://local/rpc")?;

    for person in ["Alice", "Bob"] {
        let response = greeter
            .say_hello(HelloRequest {
                person: person.to_string(),
            })
            .await?;
        println!("{}", response.greeting);
    }

    // Calls made inside a scope carry a child of the scope's vector.
    let vector = RequestVector::new("example")?;
    RequestContext::scope(vector, async {
        match greeter
            .say_hello(HelloRequest {
                person: "Carol".to_string(),
            })
            .await
        {
            Ok(response) => println!("{} (traced)", response.greeting),
            Err(error) => restwire::log_error(&restwire::Error::from(error)),
        }
    })
    .await;

    match greeter
        .say_hello(HelloRequest {
            person: "  ".to_string(),
        })
        .await
    {
        Ok(response) => println!("unexpected: {}", response.greeting),
        Err(error) => {
            println!("rejected with {:?}: {}", error.status(), error);
            if let Some(payload) = error.payload() {
                println!(
                    "  code = {}, field = {:?}",
                    payload.code,
                    payload.parameter("field")
                );
            }
        }
    }

    Ok(())
}

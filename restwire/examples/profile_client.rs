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


//! # Profile Client Example
//!
//! A REST client generated from a trait, talking to a small profile store
//! served by a closure.
//!
//! ## What This Example Shows
//!
//! - Path variables, query parameters and request bodies
//! - Configuring the factory: backoff, default headers, timeouts
//! - Error statuses surfacing as `ClientError`
//!
//! ## Running This Example
//!
//! ```bash
//! RUST_LOG=info cargo run --example profile_client
//! ```

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Method, Request, Response, StatusCode};
use restwire::backoff::TruncatedExponential;
use restwire::client::{ClientError, ClientFactory};
use restwire::transport::MemoryTransport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
}

#[restwire::client]
pub trait Profiles {
    #[get("/profile/{id}")]
    async fn get_profile(&self, #[path] id: u64) -> Result<Profile, ClientError>;

    #[put("/profile/{id}")]
    async fn put_profile(&self, #[path] id: u64, #[body] profile: Profile)
    -> Result<(), ClientError>;

    #[get("/profiles")]
    async fn find(&self, #[query("name")] prefix: String) -> Result<Vec<Profile>, ClientError>;
}

type Store = Arc<Mutex<BTreeMap<u64, Profile>>>;

fn json(status: StatusCode, body: Vec<u8>) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Bytes::from(body))
        .unwrap_or_default()
}

/// Serves the three routes above from an in-memory map.
fn serve(store: &Store, request: Request<Bytes>) -> Response<Bytes> {
    let Ok(mut store) = store.lock() else {
        return json(StatusCode::INTERNAL_SERVER_ERROR, Vec::new());
    };
    let path = request.uri().path().to_string();
    let id = path
        .strip_prefix("/api/profile/")
        .and_then(|id| id.parse::<u64>().ok());

    let method = request.method();
    if let Some(id) = id {
        if method == Method::GET {
            return match store.get(&id) {
                Some(profile) => json(StatusCode::OK, serde_json::to_vec(profile).unwrap_or_default()),
                None => json(
                    StatusCode::NOT_FOUND,
                    format!(r#"{{"code":"NotFound","message":"no profile {}"}}"#, id).into_bytes(),
                ),
            };
        }
        if method == Method::PUT {
            return match serde_json::from_slice::<Profile>(request.body()) {
                Ok(profile) => {
                    store.insert(id, profile);
                    json(StatusCode::NO_CONTENT, Vec::new())
                }
                Err(_) => json(StatusCode::BAD_REQUEST, Vec::new()),
            };
        }
    }
    if method == Method::GET && path == "/api/profiles" {
        let prefix = request
            .uri()
            .query()
            .and_then(|q| q.strip_prefix("name="))
            .unwrap_or_default();
        let found: Vec<&Profile> = store
            .values()
            .filter(|p| p.name.starts_with(prefix))
            .collect();
        return json(StatusCode::OK, serde_json::to_vec(&found).unwrap_or_default());
    }
    json(StatusCode::NOT_FOUND, Vec::new())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Profile Client Example ===\n");

    let store: Store = Arc::default();
    let server = store.clone();
    let transport = MemoryTransport::from_fn(move |request| {
        let response = serve(&server, request);
        async move { response }
    });

    let factory = ClientFactory::builder()
        .transport(Arc::new(transport))
        .request_timeout(Duration::from_secs(5))
        .backoff(
            TruncatedExponential::builder()
                .start(Duration::from_millis(50))
                .max(Duration::from_secs(2))
                .build()?,
        )
        .default_header(
            HeaderName::from_static("x-client"),
            HeaderValue::from_static("profile-example"),
        )
        .build()?;
    let profiles: ProfilesClient = factory.bind("http://profiles.local/api")?;
    println!("bound {}", profiles);

    for (id, name) in [(1, "Ada"), (2, "Alan"), (3, "Grace")] {
        profiles
            .put_profile(
                id,
                Profile {
                    id,
                    name: name.to_string(),
                },
            )
            .await?;
    }

    let ada = profiles.get_profile(1).await?;
    println!("profile 1: {}", ada.name);

    let found = profiles.find("A".to_string()).await?;
    println!("names starting with A: {}", found.len());

    match profiles.get_profile(42).await {
        Ok(profile) => println!("unexpected: {:?}", profile),
        Err(error) => println!("profile 42: {} ({:?})", error, error.status()),
    }

    Ok(())
}

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


//! Integration tests for the RPC dispatcher.
//!
//! These tests drive an [`HttpDispatcher`] with raw HTTP requests and with
//! a client proxy over the in-memory transport.

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use restwire::binding::{BindingError, ParamDecl, RouteDecl};
use restwire::client::{ClientError, ClientFactory};
use restwire::server::{HttpDispatcher, RpcMethodDecl, RpcRegistry, ServiceError};
use restwire::transport::MemoryTransport;
use restwire::wire::ErrorPayload;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
struct HelloRequest {
    person: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct HelloResponse {
    greeting: String,
}

fn say_hello() -> RpcMethodDecl {
    RpcMethodDecl::new("sayHello", |request: HelloRequest| async move {
        Ok::<_, ServiceError>(HelloResponse {
            greeting: format!("Hello, {}", request.person),
        })
    })
}

fn dispatcher() -> HttpDispatcher {
    let registry = RpcRegistry::builder().method(say_hello()).build().unwrap();
    HttpDispatcher::new(registry)
}

fn post(uri: &str, body: &str) -> Request<Bytes> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .body(Bytes::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_say_hello_json() {
    let response = dispatcher()
        .dispatch(post("/rpc/sayHello", r#"{"person":"Alice"}"#))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

    let body: HelloResponse = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body.greeting, "Hello, Alice");
}

#[tokio::test]
async fn test_unknown_method_payload() {
    let response = dispatcher()
        .dispatch(post("/rpc/frobnicate", "{}"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let payload: ErrorPayload = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(payload.code, "NotFound");
    assert_eq!(payload.parameter("method"), Some("frobnicate"));
}

#[tokio::test]
async fn test_overloaded_names_last_wins() {
    let registry = RpcRegistry::builder()
        .method(say_hello())
        .method(RpcMethodDecl::new("sayHello", |person: String| async move {
            Ok::<_, ServiceError>(format!("Hi {}", person))
        }))
        .build()
        .unwrap();
    assert_eq!(registry.len(), 1);

    let response = HttpDispatcher::new(registry)
        .dispatch(post("/sayHello", r#""Bob""#))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let greeting: String = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(greeting, "Hi Bob");
}

#[test]
fn test_overloaded_names_rejected_when_strict() {
    let err = RpcRegistry::builder()
        .strict_overloads(true)
        .method(say_hello())
        .method(say_hello())
        .build()
        .unwrap_err();
    assert!(matches!(err, BindingError::DuplicateMethod { .. }));
}

#[tokio::test]
async fn test_proxy_round_trip() {
    let transport = MemoryTransport::new(Arc::new(dispatcher()));
    let factory = ClientFactory::builder()
        .transport(Arc::new(transport))
        .build()
        .unwrap();
    let proxy = factory
        .proxy(
            "Greeter",
            "http://local/rpc",
            vec![
                RouteDecl::new("sayHello")
                    .verb(Method::POST)
                    .path("/sayHello")
                    .param(ParamDecl::body("request")),
                RouteDecl::new("wave")
                    .verb(Method::GET)
                    .path("/wave"),
            ],
        )
        .unwrap();

    let args = vec![serde_json::json!({"person": "Carol"})];
    let response: HelloResponse = proxy.invoke("sayHello", args).await.unwrap();
    assert_eq!(response.greeting, "Hello, Carol");

    let err = proxy.invoke::<String>("wave", Vec::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::METHOD_NOT_ALLOWED));

    let err = proxy.invoke::<String>("jump", Vec::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedMethod { .. }));
}

#[tokio::test]
async fn test_bad_request_reaches_client() {
    let transport = MemoryTransport::new(Arc::new(dispatcher()));
    let factory = ClientFactory::builder()
        .transport(Arc::new(transport))
        .build()
        .unwrap();
    let proxy = factory
        .proxy(
            "Greeter",
            "http://local",
            vec![
                RouteDecl::new("sayHello")
                    .verb(Method::POST)
                    .path("/sayHello")
                    .param(ParamDecl::body("request")),
            ],
        )
        .unwrap();

    let err = proxy
        .invoke::<HelloResponse>("sayHello", vec![serde_json::json!({"name": 1})])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.payload().unwrap().code, "BadRequest");
}

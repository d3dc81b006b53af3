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

//! Integration tests for client request construction.
//!
//! These tests record the exchanges a bound client produces and check the
//! verb, URI, headers and body of each.

#![cfg(feature = "derive")]

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, Method, StatusCode};
use restwire::async_trait;
use restwire::binding::{ArgumentError, BindingError, ParamDecl, RouteDecl};
use restwire::client::{ClientError, ClientFactory};
use restwire::observability::{REQUEST_VECTOR_HEADER, RequestContext, RequestVector};
use restwire::transport::{ExchangeRequest, ExchangeResponse, HttpTransport, TransportError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
}

#[restwire::client]
pub trait Profiles {
    #[get("/profile/{id}")]
    async fn get_profile(&self, #[path] id: u64) -> Result<Profile, ClientError>;

    #[get("/profiles")]
    async fn search(
        &self,
        #[query("q")] text: String,
        #[query] tags: Vec<String>,
        #[query] limit: Option<u32>,
    ) -> Result<Vec<Profile>, ClientError>;

    #[put("/profile/{id}")]
    async fn store(&self, #[path] id: u64, #[body] profile: Profile) -> Result<(), ClientError>;

    #[get("/files/{name}")]
    async fn file(&self, #[path] name: Option<String>) -> Result<String, ClientError>;

    #[get("/health")]
    async fn health(&self) -> Result<String, ClientError>;
}

/// Records every request and answers with a fixed response.
struct Recorder {
    requests: Mutex<Vec<ExchangeRequest>>,
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
}

impl Recorder {
    fn new(status: StatusCode, content_type: &'static str, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            status,
            content_type,
            body,
        })
    }

    fn last(&self) -> ExchangeRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for Recorder {
    async fn exchange(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let mut response = ExchangeResponse::new(self.status, Bytes::from_static(self.body.as_bytes()));
        response
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        Ok(response)
    }

    fn name(&self) -> &str {
        "recorder"
    }
}

fn bind(recorder: &Arc<Recorder>) -> ProfilesClient {
    ClientFactory::builder()
        .transport(recorder.clone())
        .default_header(
            HeaderName::from_static("x-tenant"),
            HeaderValue::from_static("blue"),
        )
        .build()
        .unwrap()
        .bind("http://host/api")
        .unwrap()
}

#[tokio::test]
async fn test_path_variable_request() {
    let recorder = Recorder::new(StatusCode::OK, "application/json", r#"{"id":7,"name":"Ada"}"#);
    let client = bind(&recorder);

    let profile = client.get_profile(7).await.unwrap();
    assert_eq!(
        profile,
        Profile {
            id: 7,
            name: "Ada".to_string()
        }
    );

    let request = recorder.last();
    assert_eq!(request.verb, Method::GET);
    assert_eq!(request.uri.as_str(), "http://host/api/profile/7");
    assert!(request.body.is_none());
    assert!(request.headers.get(CONTENT_TYPE).is_none());
    assert_eq!(request.headers.get("x-tenant").unwrap(), "blue");
    assert!(
        request.headers[ACCEPT]
            .to_str()
            .unwrap()
            .contains("application/json")
    );
}

#[tokio::test]
async fn test_query_parameters() {
    let recorder = Recorder::new(StatusCode::OK, "application/json", "[]");
    let client = bind(&recorder);

    let found = client
        .search(
            "a b".to_string(),
            vec!["x".to_string(), "y".to_string()],
            None,
        )
        .await
        .unwrap();
    assert!(found.is_empty());

    let uri = recorder.last().uri;
    assert_eq!(uri.path(), "/api/profiles");
    let pairs: Vec<(String, String)> = uri.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("q".to_string(), "a b".to_string()),
            ("tags".to_string(), "x".to_string()),
            ("tags".to_string(), "y".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_body_is_encoded() {
    let recorder = Recorder::new(StatusCode::NO_CONTENT, "application/json", "");
    let client = bind(&recorder);

    client
        .store(
            3,
            Profile {
                id: 3,
                name: "Grace".to_string(),
            },
        )
        .await
        .unwrap();

    let request = recorder.last();
    assert_eq!(request.verb, Method::PUT);
    assert_eq!(request.uri.as_str(), "http://host/api/profile/3");
    assert_eq!(request.headers[CONTENT_TYPE], "application/json");
    let body: Profile = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(body.name, "Grace");
}

#[tokio::test]
async fn test_missing_path_variable_fails_before_sending() {
    let recorder = Recorder::new(StatusCode::OK, "text/plain", "x");
    let client = bind(&recorder);

    let err = client.file(None).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Argument(ArgumentError::MissingPathVariable { .. })
    ));
    assert!(recorder.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_zero_argument_method_uses_fixed_uri() {
    let recorder = Recorder::new(StatusCode::OK, "text/plain", "ok");
    let client = bind(&recorder);

    assert_eq!(client.health().await.unwrap(), "ok");
    assert_eq!(client.health().await.unwrap(), "ok");

    let descriptor = restwire::client::BoundClient::proxy(&client)
        .routes()
        .get("health")
        .unwrap();
    assert!(descriptor.uri().is_cached());
    assert_eq!(recorder.last().uri.as_str(), "http://host/api/health");
}

#[tokio::test]
async fn test_error_status_is_not_decoded_as_result() {
    let recorder = Recorder::new(
        StatusCode::NOT_FOUND,
        "application/json",
        r#"{"code":"NotFound","message":"no profile 9"}"#,
    );
    let client = bind(&recorder);

    let err = client.get_profile(9).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.is_client_error());
    assert_eq!(err.payload().unwrap().message, "no profile 9");
}

#[tokio::test]
async fn test_unstructured_error_body() {
    let recorder = Recorder::new(StatusCode::BAD_GATEWAY, "text/html", "<h1>bad gateway</h1>");
    let client = bind(&recorder);

    match client.get_profile(1).await.unwrap_err() {
        ClientError::Status { status, body } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert!(body.contains("bad gateway"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_request_vector_propagates_to_child_calls() {
    let recorder = Recorder::new(StatusCode::OK, "text/plain", "ok");
    let client = bind(&recorder);

    client.health().await.unwrap();
    assert!(recorder.last().headers.get(REQUEST_VECTOR_HEADER).is_none());

    let parent = RequestVector::new("root").unwrap();
    RequestContext::scope(parent.clone(), async {
        client.health().await.unwrap();
    })
    .await;

    let header = recorder.last().headers[REQUEST_VECTOR_HEADER]
        .to_str()
        .unwrap()
        .to_string();
    let child = RequestVector::parse(&header).unwrap();
    assert_eq!(child.root(), "root");
    assert_eq!(child.parent(), Some(parent));
}

#[test]
fn test_invalid_routes_fail_at_bind() {
    let recorder = Recorder::new(StatusCode::OK, "text/plain", "");
    let factory = ClientFactory::builder()
        .transport(recorder)
        .build()
        .unwrap();

    let err = factory
        .proxy(
            "Broken",
            "http://host",
            vec![
                RouteDecl::new("get")
                    .verb(Method::GET)
                    .path("/items/{id}")
                    .param(ParamDecl::query("id", "id")),
            ],
        )
        .unwrap_err();
    assert!(matches!(err, BindingError::UnboundPathVariable { .. }));

    let err = factory
        .proxy(
            "Broken",
            "http://host",
            vec![RouteDecl::new("put").param(ParamDecl::new("value"))],
        )
        .unwrap_err();
    assert!(matches!(err, BindingError::UnrecognizedParameter { .. }));
}

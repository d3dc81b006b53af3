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


//! HTTP dispatcher for registered RPC methods.

use crate::codec::{
    Codec, CodecRegistry, JsonCodec, MediaError, MediaType, parse_accept, to_value,
};
use crate::observability::{REQUEST_VECTOR_HEADER, RequestContext, RequestVector, log_error};
use crate::server::{
    DispatchError, DispatcherConfig, InvocationError, RpcMethodDecl, RpcRegistry,
};
use crate::transport::RequestHandler;
use crate::wire::ErrorPayload;
use async_trait::async_trait;
use bytes::Bytes;
use futures::FutureExt;
use http::header::{ACCEPT, ALLOW, CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, HeaderName, Method, Request, Response};
use serde_json::Value;
use std::any::type_name;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Maps inbound `POST` requests onto registered methods.
///
/// The dispatcher is stateless between requests and can serve any number of
/// them concurrently. Every failure becomes a response carrying an
/// [`ErrorPayload`].
///
/// # Examples
///
/// ```rust
/// use restwire::server::{HttpDispatcher, RpcMethodDecl, RpcRegistry, ServiceError};
/// use bytes::Bytes;
/// use http::{Request, StatusCode};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = RpcRegistry::builder()
///     .method(RpcMethodDecl::new("echo", |s: String| async move {
///         Ok::<_, ServiceError>(s)
///     }))
///     .build()?;
/// let dispatcher = HttpDispatcher::new(registry);
///
/// let request = Request::post("/rpc/echo")
///     .header("content-type", "application/json")
///     .body(Bytes::from_static(b"\"hi\""))?;
/// let response = dispatcher.dispatch(request).await;
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body().as_ref(), b"\"hi\"");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    registry: Arc<RpcRegistry>,
    codecs: CodecRegistry,
    config: DispatcherConfig,
}

impl HttpDispatcher {
    /// Creates a dispatcher with the default codecs and configuration.
    pub fn new(registry: RpcRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            codecs: CodecRegistry::with_defaults(),
            config: DispatcherConfig::default(),
        }
    }

    pub fn with_codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = codecs;
        self
    }

    pub fn with_config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &RpcRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Handles one request.
    ///
    /// The incoming `x-request-vector` header, or a fresh root when absent
    /// or malformed, is the ambient [`RequestContext`] while the method runs.
    #[instrument(skip_all, fields(verb = %request.method(), path = %request.uri().path()))]
    pub async fn dispatch(&self, request: Request<Bytes>) -> Response<Bytes> {
        let vector = request_vector(request.headers());
        debug!(request_vector = %vector, "dispatching");
        RequestContext::scope(vector, self.dispatch_in_context(request)).await
    }

    /// Answers a request that failed before it could be dispatched, such as
    /// a body that could not be read, with the same payload and negotiation
    /// as [`dispatch`](Self::dispatch).
    #[cfg(feature = "axum")]
    pub(crate) async fn reject(
        &self,
        headers: &HeaderMap,
        error: DispatchError,
    ) -> Response<Bytes> {
        let vector = request_vector(headers);
        RequestContext::scope(vector, async {
            let content_type = content_type(headers);
            let accepted = accepted_types(headers, content_type.as_ref());
            let response = self.error_response(&error, &accepted);
            log_error(&crate::Error::Dispatch(error));
            response
        })
        .await
    }

    async fn dispatch_in_context(&self, request: Request<Bytes>) -> Response<Bytes> {
        let content_type = content_type(request.headers());
        let accepted = accepted_types(request.headers(), content_type.as_ref());

        match self.handle(&request, content_type, &accepted).await {
            Ok((media_type, body)) => {
                let mut response = with_vector(Response::new(Bytes::from(body)));
                set_content_type(response.headers_mut(), &media_type);
                response
            }
            Err(error) => {
                let response = self.error_response(&error, &accepted);
                log_error(&crate::Error::Dispatch(error));
                response
            }
        }
    }

    async fn handle(
        &self,
        request: &Request<Bytes>,
        content_type: Option<Result<MediaType, MediaError>>,
        accepted: &[MediaType],
    ) -> Result<(MediaType, Vec<u8>), DispatchError> {
        if request.method() != Method::POST {
            return Err(DispatchError::MethodNotAllowed {
                verb: request.method().clone(),
            });
        }
        let size = request.body().len();
        if size > self.config.max_body_bytes {
            return Err(DispatchError::PayloadTooLarge {
                size,
                limit: self.config.max_body_bytes,
            });
        }

        let content_type = content_type
            .unwrap_or(Err(MediaError::MissingContentType))
            .map_err(DispatchError::UnsupportedMediaType)?;
        if !self.codecs.supports(&content_type) {
            return Err(DispatchError::UnsupportedMediaType(
                MediaError::UnsupportedMediaType {
                    media_type: content_type.to_string(),
                },
            ));
        }

        let name = self.method_name(request);
        let decl = self
            .registry
            .get(&name)
            .ok_or(DispatchError::NotFound { method: name.clone() })?;

        let input = self.decode(decl, &content_type, request.body())?;
        let output = self.invoke(decl, input).await?;

        let (codec, media_type) = self
            .codecs
            .negotiate_writer(decl.output_type(), accepted)
            .map_err(|source| DispatchError::NotAcceptable {
                method: name.clone(),
                source,
            })?;
        let body = codec.write(&output).map_err(|source| DispatchError::Internal {
            method: name,
            source: Some(source),
        })?;
        Ok((media_type, body))
    }

    /// The configured query parameter when present, else the last non-empty
    /// path segment.
    fn method_name(&self, request: &Request<Bytes>) -> String {
        let from_query = request.uri().query().and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == &self.config.method_parameter)
                .map(|(_, value)| value.into_owned())
        });
        from_query
            .or_else(|| {
                request
                    .uri()
                    .path()
                    .rsplit('/')
                    .find(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }

    fn decode(
        &self,
        decl: &RpcMethodDecl,
        content_type: &MediaType,
        body: &Bytes,
    ) -> Result<Value, DispatchError> {
        let codec = self
            .codecs
            .reader_for(decl.input_type(), content_type)
            .ok_or_else(|| DispatchError::NoReader {
                method: decl.name().to_string(),
                source: MediaError::NoReader {
                    type_name: decl.input_type().to_string(),
                    media_type: content_type.to_string(),
                },
            })?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        codec.read(body).map_err(|source| DispatchError::BadRequest {
            method: decl.name().to_string(),
            source,
        })
    }

    async fn invoke(&self, decl: &RpcMethodDecl, input: Value) -> Result<Value, DispatchError> {
        let method = decl.name().to_string();
        let Some(invoker) = decl.invoker() else {
            return Err(DispatchError::Internal {
                method,
                source: None,
            });
        };
        match AssertUnwindSafe(invoker(input)).catch_unwind().await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(InvocationError::Input(source))) => {
                Err(DispatchError::BadRequest { method, source })
            }
            Ok(Err(InvocationError::Output(source))) => Err(DispatchError::Internal {
                method,
                source: Some(source),
            }),
            Ok(Err(InvocationError::Service(source))) => {
                Err(DispatchError::Service { method, source })
            }
            Err(_) => Err(DispatchError::Internal {
                method,
                source: None,
            }),
        }
    }

    fn error_response(&self, error: &DispatchError, accepted: &[MediaType]) -> Response<Bytes> {
        let payload = error.to_payload();
        let (body, media_type) = self.encode_payload(&payload, accepted);

        let mut response = with_vector(Response::new(Bytes::from(body)));
        *response.status_mut() = error.status();
        set_content_type(response.headers_mut(), &media_type);
        if matches!(error, DispatchError::MethodNotAllowed { .. }) {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("POST"));
        }
        response
    }

    /// Encodes with the negotiated codec when it can, else JSON.
    fn encode_payload(
        &self,
        payload: &ErrorPayload,
        accepted: &[MediaType],
    ) -> (Vec<u8>, MediaType) {
        let value = to_value(payload).unwrap_or(Value::Null);
        if let Ok((codec, media_type)) = self
            .codecs
            .negotiate_writer(type_name::<ErrorPayload>(), accepted)
        {
            if let Ok(body) = codec.write(&value) {
                return (body, media_type);
            }
        }
        let json = JsonCodec::new();
        (json.write(&value).unwrap_or_default(), json.media_type().clone())
    }
}

#[async_trait]
impl RequestHandler for HttpDispatcher {
    async fn handle(&self, request: Request<Bytes>) -> Response<Bytes> {
        self.dispatch(request).await
    }
}

fn request_vector(headers: &HeaderMap) -> RequestVector {
    headers
        .get(REQUEST_VECTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| RequestVector::parse(value).ok())
        .unwrap_or_else(RequestVector::new_root)
}

fn content_type(headers: &HeaderMap) -> Option<Result<MediaType, MediaError>> {
    headers.get(CONTENT_TYPE).map(|value| {
        value
            .to_str()
            .map_err(|_| MediaError::InvalidMediaType {
                value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            })
            .and_then(MediaType::parse)
    })
}

/// The `Accept` list, falling back to the request's own content type.
fn accepted_types(
    headers: &HeaderMap,
    content_type: Option<&Result<MediaType, MediaError>>,
) -> Vec<MediaType> {
    if let Some(accept) = headers.get(ACCEPT).and_then(|value| value.to_str().ok()) {
        return parse_accept(accept);
    }
    match content_type {
        Some(Ok(media_type)) => vec![media_type.without_params()],
        _ => vec![MediaType::any()],
    }
}

fn set_content_type(headers: &mut HeaderMap, media_type: &MediaType) {
    if let Ok(value) = HeaderValue::from_str(&media_type.to_string()) {
        headers.insert(CONTENT_TYPE, value);
    }
}

fn with_vector(mut response: Response<Bytes>) -> Response<Bytes> {
    if let Some(vector) = RequestContext::current() {
        if let Ok(value) = HeaderValue::from_str(&vector.to_string()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_VECTOR_HEADER), value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServiceError;
    use http::StatusCode;

    fn dispatcher() -> HttpDispatcher {
        let registry = RpcRegistry::builder()
            .method(RpcMethodDecl::new("double", |x: i64| async move {
                Ok::<_, ServiceError>(x * 2)
            }))
            .method(RpcMethodDecl::new("shout", |s: String| async move {
                Ok::<_, ServiceError>(s.to_uppercase())
            }))
            .method(RpcMethodDecl::new("name", |_: ()| async move {
                Ok::<_, ServiceError>("restwire".to_string())
            }))
            .method(RpcMethodDecl::new("guarded", |_: ()| async move {
                Err::<(), _>(ServiceError::access_denied("members only"))
            }))
            .method(RpcMethodDecl::new("explode", |_: ()| async move {
                if true {
                    panic!("boom");
                }
                Ok::<(), ServiceError>(())
            }))
            .build()
            .unwrap();
        HttpDispatcher::new(registry)
    }

    fn post(path: &str, content_type: Option<&str>, body: &'static str) -> Request<Bytes> {
        let mut builder = Request::post(path);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Bytes::from_static(body.as_bytes())).unwrap()
    }

    fn payload(response: &Response<Bytes>) -> ErrorPayload {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[tokio::test]
    async fn test_success() {
        let response = dispatcher()
            .dispatch(post("/rpc/double", Some("application/json"), "21"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(response.body().as_ref(), b"42");
        assert!(response.headers().contains_key(REQUEST_VECTOR_HEADER));
    }

    #[tokio::test]
    async fn test_non_post_rejected() {
        let request = Request::get("/rpc/double").body(Bytes::new()).unwrap();
        let response = dispatcher().dispatch(request).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "POST");
        assert_eq!(payload(&response).code, "MethodNotAllowed");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let response = dispatcher().dispatch(post("/rpc/double", None, "21")).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_unsupported_content_type() {
        let response = dispatcher()
            .dispatch(post("/rpc/double", Some("application/xml"), "<x/>"))
            .await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(payload(&response).code, "UnsupportedMediaType");
    }

    #[tokio::test]
    async fn test_bad_body() {
        let response = dispatcher()
            .dispatch(post("/rpc/double", Some("application/json"), "\"nan\""))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = dispatcher()
            .dispatch(post("/rpc/double", Some("application/json"), "{"))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_no_reader_is_internal_not_bad_request() {
        let response = dispatcher()
            .dispatch(post("/rpc/double", Some("text/plain"), "21"))
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let no_reader = payload(&response);
        assert_eq!(no_reader.code, "InternalError");

        let response = dispatcher()
            .dispatch(post("/rpc/double", Some("application/json"), "\"21\""))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_ne!(payload(&response).code, no_reader.code);
    }

    #[tokio::test]
    async fn test_response_type_falls_back_to_content_type() {
        let response = dispatcher()
            .dispatch(post("/rpc/shout", Some("text/plain"), "hello"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.body().as_ref(), b"HELLO");
    }

    #[tokio::test]
    async fn test_service_error_status() {
        let response = dispatcher()
            .dispatch(post("/rpc/guarded", Some("application/json"), ""))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let payload = payload(&response);
        assert_eq!(payload.code, "AccessDenied");
        assert_eq!(payload.message, "members only");
    }

    #[tokio::test]
    async fn test_panic_is_internal_error() {
        let response = dispatcher()
            .dispatch(post("/rpc/explode", Some("application/json"), ""))
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload = payload(&response);
        assert_eq!(payload.code, "InternalError");
        assert!(!payload.message.contains("boom"));
    }

    #[tokio::test]
    async fn test_text_accept() {
        let request = Request::post("/rpc/name")
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/plain")
            .body(Bytes::new())
            .unwrap();
        let response = dispatcher().dispatch(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.body().as_ref(), b"restwire");
    }

    #[tokio::test]
    async fn test_not_acceptable() {
        let request = Request::post("/rpc/double")
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "image/png")
            .body(Bytes::from_static(b"1"))
            .unwrap();
        let response = dispatcher().dispatch(request).await;
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(payload(&response).code, "NotAcceptable");
    }

    #[tokio::test]
    async fn test_method_from_query() {
        let response = dispatcher()
            .dispatch(post("/?method=double", Some("application/json"), "4"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"8");
    }

    #[tokio::test]
    async fn test_method_query_wins_over_mount_path() {
        let response = dispatcher()
            .dispatch(post("/rpc?method=double", Some("application/json"), "5"))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"10");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let dispatcher =
            dispatcher().with_config(DispatcherConfig::new().with_max_body_bytes(1));
        let response = dispatcher
            .dispatch(post("/rpc/double", Some("application/json"), "100"))
            .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_request_vector_echoed() {
        let request = Request::post("/rpc/double")
            .header(CONTENT_TYPE, "application/json")
            .header(REQUEST_VECTOR_HEADER, "abc.1.2")
            .body(Bytes::from_static(b"1"))
            .unwrap();
        let response = dispatcher().dispatch(request).await;
        assert_eq!(response.headers()[REQUEST_VECTOR_HEADER], "abc.1.2");
    }
}

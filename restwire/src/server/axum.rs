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


//! Mounting a dispatcher in an axum application.

use crate::server::{DispatchError, HttpDispatcher};
use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::Response;
use http::header::CONTENT_LENGTH;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::sync::Arc;

/// Builds a router that sends every request to `dispatcher`.
///
/// The dispatcher is installed as the fallback, so the router can be
/// nested under any prefix.
///
/// # Examples
///
/// ```rust,no_run
/// use restwire::server::{HttpDispatcher, RpcRegistry};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dispatcher = HttpDispatcher::new(RpcRegistry::builder().build()?);
/// let app = axum::Router::new().nest("/rpc", restwire::server::axum::router(dispatcher));
///
/// let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn router(dispatcher: HttpDispatcher) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(Arc::new(dispatcher))
}

async fn handle(State(dispatcher): State<Arc<HttpDispatcher>>, request: Request) -> Response {
    let limit = dispatcher.config().max_body_bytes;
    let (parts, body) = request.into_parts();
    let response = match Limited::new(body, limit).collect().await {
        Ok(collected) => {
            dispatcher
                .dispatch(http::Request::from_parts(parts, collected.to_bytes()))
                .await
        }
        Err(error) => {
            let error = if error.downcast_ref::<LengthLimitError>().is_some() {
                let size = parts
                    .headers
                    .get(CONTENT_LENGTH)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse().ok())
                    .unwrap_or_else(|| limit.saturating_add(1));
                DispatchError::PayloadTooLarge { size, limit }
            } else {
                DispatchError::UnreadableBody {
                    reason: error.to_string(),
                }
            };
            dispatcher.reject(&parts.headers, error).await
        }
    };
    response.map(Body::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{DispatcherConfig, RpcMethodDecl, RpcRegistry, ServiceError};
    use crate::wire::ErrorPayload;
    use http::StatusCode;
    use http::header::CONTENT_TYPE;
    use tower::ServiceExt;

    fn dispatcher() -> HttpDispatcher {
        let registry = RpcRegistry::builder()
            .method(RpcMethodDecl::new("inc", |x: i64| async move {
                Ok::<_, ServiceError>(x + 1)
            }))
            .build()
            .unwrap();
        HttpDispatcher::new(registry)
    }

    #[tokio::test]
    async fn test_router_dispatches() {
        let app = router(dispatcher());

        let request = http::Request::post("/inc")
            .header("content-type", "application/json")
            .body(Body::from("41"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(body.as_ref(), b"42");
    }

    #[tokio::test]
    async fn test_oversized_body_gets_error_payload() {
        let app = router(
            dispatcher().with_config(DispatcherConfig::new().with_max_body_bytes(4)),
        );

        let request = http::Request::post("/inc")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("1234567890"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let payload: ErrorPayload = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.code, "PayloadTooLarge");
        assert!(
            payload
                .parameters
                .iter()
                .any(|p| p.key == "limit" && p.value.as_deref() == Some("4"))
        );
    }
}

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

//! In-memory transport implementation for testing.
//!
//! This module provides a transport that hands each request straight to a
//! [`RequestHandler`] in the same process. It is useful for testing a client
//! against a real dispatcher without network I/O.

use crate::transport::{
    ExchangeRequest, ExchangeResponse, HttpTransport, RequestHandler, TransportError,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, instrument};

/// A transport that loops requests back into an in-process handler.
///
/// # Examples
///
/// ```rust
/// use restwire::transport::{ExchangeRequest, HttpTransport, MemoryTransport};
/// use bytes::Bytes;
/// use http::{Method, Response, StatusCode};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = MemoryTransport::from_fn(|_request| async {
///     Response::builder()
///         .status(StatusCode::NO_CONTENT)
///         .body(Bytes::new())
///         .unwrap()
/// });
///
/// let request = ExchangeRequest::new(Method::GET, Url::parse("http://local/ping")?);
/// let response = transport.exchange(request).await?;
/// assert_eq!(response.status, StatusCode::NO_CONTENT);
/// # Ok(())
/// # }
/// ```
pub struct MemoryTransport {
    handler: Arc<dyn RequestHandler>,
    exchanges: AtomicU64,
    closed: AtomicBool,
}

impl MemoryTransport {
    /// Creates a transport backed by the given handler.
    pub fn new(handler: Arc<dyn RequestHandler>) -> Self {
        Self {
            handler,
            exchanges: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Creates a transport backed by an async closure.
    pub fn from_fn<F, Fut>(handler: F) -> Self
    where
        F: Fn(http::Request<Bytes>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = http::Response<Bytes>> + Send + 'static,
    {
        Self::new(Arc::new(FnHandler(handler)))
    }

    /// Number of exchanges completed so far.
    pub fn exchange_count(&self) -> u64 {
        self.exchanges.load(Ordering::Relaxed)
    }

    /// Closes the transport. Subsequent exchanges fail with
    /// [`TransportError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for MemoryTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTransport")
            .field("exchanges", &self.exchange_count())
            .field("closed", &self.closed.load(Ordering::Acquire))
            .finish()
    }
}

#[async_trait]
impl HttpTransport for MemoryTransport {
    #[instrument(skip(self, request), fields(verb = %request.verb, uri = %request.uri))]
    async fn exchange(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        let request = request
            .into_http()
            .map_err(|e| TransportError::InvalidRequest {
                reason: e.to_string(),
            })?;
        let response = self.handler.handle(request).await;
        self.exchanges.fetch_add(1, Ordering::Relaxed);
        debug!(status = %response.status(), "memory exchange complete");
        Ok(response.into())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> RequestHandler for FnHandler<F>
where
    F: Fn(http::Request<Bytes>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = http::Response<Bytes>> + Send + 'static,
{
    async fn handle(&self, request: http::Request<Bytes>) -> http::Response<Bytes> {
        (self.0)(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use url::Url;

    fn echo() -> MemoryTransport {
        MemoryTransport::from_fn(|request: http::Request<Bytes>| async move {
            let path = request.uri().path().to_string();
            http::Response::builder()
                .status(StatusCode::OK)
                .body(Bytes::from(path))
                .unwrap()
        })
    }

    #[tokio::test]
    async fn test_exchange_reaches_handler() {
        let transport = echo();
        let request = ExchangeRequest::new(Method::GET, Url::parse("http://local/a/b").unwrap());
        let response = transport.exchange(request).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, Bytes::from_static(b"/a/b"));
        assert_eq!(transport.exchange_count(), 1);
        assert_eq!(transport.name(), "memory");
    }

    #[tokio::test]
    async fn test_closed_transport_rejects() {
        let transport = echo();
        transport.close();
        let request = ExchangeRequest::new(Method::GET, Url::parse("http://local/").unwrap());
        let err = transport.exchange(request).await.unwrap_err();
        assert!(matches!(err, TransportError::Closed));
        assert_eq!(transport.exchange_count(), 0);
    }
}

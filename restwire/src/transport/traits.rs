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

//! Transport trait definitions.

use crate::transport::{ExchangeRequest, ExchangeResponse, TransportError};
use async_trait::async_trait;
use bytes::Bytes;

/// Performs HTTP exchanges on behalf of client proxies.
///
/// One transport is shared by every proxy created from a
/// [`ClientFactory`](crate::client::ClientFactory), so implementations pool
/// connections internally and must be safe to call concurrently.
///
/// An error status is a successful exchange: implementations return it as
/// an [`ExchangeResponse`] and reserve [`TransportError`] for exchanges that
/// did not complete.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends the request and waits for the complete response.
    async fn exchange(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Answers HTTP requests in process.
///
/// Implemented by [`HttpDispatcher`](crate::server::HttpDispatcher) so a
/// dispatcher can sit behind a [`MemoryTransport`](crate::transport::MemoryTransport)
/// or be mounted into a web framework.
#[async_trait]
pub trait RequestHandler: Send + Sync + 'static {
    /// Produces the response for one request. Never fails: errors are
    /// rendered as error statuses.
    async fn handle(&self, request: http::Request<Bytes>) -> http::Response<Bytes>;
}

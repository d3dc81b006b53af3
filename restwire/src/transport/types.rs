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

//! Request and response types exchanged with a transport.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderMap};
use http::{Method, StatusCode};
use url::Url;

/// A fully resolved HTTP request produced by a client proxy.
///
/// Cloning is cheap: the body is reference counted so that a retry can
/// resend the same request.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    /// HTTP verb.
    pub verb: Method,
    /// Absolute target URI including the query string.
    pub uri: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Encoded body, if the call carries one.
    pub body: Option<Bytes>,
}

impl ExchangeRequest {
    /// Creates a request without headers or body.
    pub fn new(verb: Method, uri: Url) -> Self {
        Self {
            verb,
            uri,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Converts into an [`http::Request`].
    pub fn into_http(self) -> Result<http::Request<Bytes>, http::Error> {
        let mut builder = http::Request::builder()
            .method(self.verb)
            .uri(self.uri.as_str());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers);
        }
        builder.body(self.body.unwrap_or_default())
    }
}

/// The response to an [`ExchangeRequest`].
#[derive(Debug, Clone)]
pub struct ExchangeResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw response body, possibly empty.
    pub body: Bytes,
}

impl ExchangeResponse {
    /// Creates a response without headers.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// The raw `Content-Type` header, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

impl From<http::Response<Bytes>> for ExchangeResponse {
    fn from(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

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

//! The per-interface call interceptor behind every generated client.

use crate::backoff::BackoffStrategy;
use crate::binding::{MethodBindingDescriptor, RouteTable};
use crate::client::ClientError;
use crate::codec::{CodecRegistry, MediaError, MediaType, from_value};
use crate::observability::{REQUEST_VECTOR_HEADER, RequestContext, RequestVectorSource};
use crate::transport::{ExchangeRequest, ExchangeResponse, HttpTransport, TransportError};
use crate::wire::ErrorPayload;
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, HeaderName};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::type_name;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// State shared by every proxy created from one factory.
pub(crate) struct ClientShared {
    pub(crate) transport: Arc<dyn HttpTransport>,
    pub(crate) codecs: CodecRegistry,
    pub(crate) backoff: Arc<dyn BackoffStrategy>,
    pub(crate) request_media_type: MediaType,
    pub(crate) content_type: HeaderValue,
    pub(crate) accept: HeaderValue,
    pub(crate) default_headers: HeaderMap,
    pub(crate) vectors: RequestVectorSource,
}

/// Translates method calls of one interface into HTTP exchanges.
///
/// A proxy is immutable once built. It can be shared freely between tasks,
/// and each call gets its own backoff mark.
pub struct ClientProxy {
    interface: String,
    routes: RouteTable,
    shared: Arc<ClientShared>,
}

impl ClientProxy {
    pub(crate) fn new(
        interface: impl Into<String>,
        routes: RouteTable,
        shared: Arc<ClientShared>,
    ) -> Self {
        Self {
            interface: interface.into(),
            routes,
            shared,
        }
    }

    /// Simple name of the bound interface.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The bound route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Builds the request a call would send, without sending it.
    pub fn request_for(
        &self,
        method: &str,
        args: &[Value],
    ) -> Result<ExchangeRequest, ClientError> {
        let descriptor = self.descriptor(method)?;
        let (uri, body) = descriptor.resolve(args)?;

        let mut request = ExchangeRequest::new(descriptor.verb().clone(), uri);
        request.headers.extend(self.shared.default_headers.clone());
        request.headers.insert(ACCEPT, self.shared.accept.clone());

        if let Some(body) = body {
            let type_name = value_type_name(body);
            let codec = self
                .shared
                .codecs
                .writer_for(type_name, &self.shared.request_media_type)
                .ok_or_else(|| MediaError::NoWriter {
                    type_name: type_name.to_string(),
                    accepted: self.shared.request_media_type.to_string(),
                })?;
            request.body = Some(Bytes::from(codec.write(body)?));
            request
                .headers
                .insert(CONTENT_TYPE, self.shared.content_type.clone());
        }

        if let Some(parent) = RequestContext::current() {
            let child = self.shared.vectors.next_child(&parent);
            if let Ok(value) = HeaderValue::from_str(&child.to_string()) {
                request
                    .headers
                    .insert(HeaderName::from_static(REQUEST_VECTOR_HEADER), value);
            }
        }

        Ok(request)
    }

    /// Performs one call and decodes its result as `R`.
    ///
    /// Recoverable transport failures are retried on the factory's backoff
    /// schedule. HTTP error statuses are returned at once.
    #[instrument(skip(self, args), fields(interface = %self.interface))]
    pub async fn invoke<R>(&self, method: &str, args: Vec<Value>) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let request = self.request_for(method, &args)?;
        let response = self.exchange_with_retry(request).await?;

        if !response.status.is_success() {
            return Err(self.decode_error(response));
        }
        let value = self.decode(type_name::<R>(), &response)?;
        Ok(from_value(value)?)
    }

    fn descriptor(&self, method: &str) -> Result<&MethodBindingDescriptor, ClientError> {
        self.routes
            .get(method)
            .ok_or_else(|| ClientError::UnsupportedMethod {
                interface: self.interface.clone(),
                method: method.to_string(),
            })
    }

    async fn exchange_with_retry(
        &self,
        request: ExchangeRequest,
    ) -> Result<ExchangeResponse, TransportError> {
        let mut mark = self.shared.backoff.new_mark();
        let mut attempt = 1u32;
        loop {
            match self.shared.transport.exchange(request.clone()).await {
                Ok(response) => {
                    debug!(status = %response.status, attempt, "exchange complete");
                    return Ok(response);
                }
                Err(error) if error.is_recoverable() => match mark.next_retry_time() {
                    Some(delay) => {
                        warn!(
                            error = %error,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            "exchange failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => return Err(error),
                },
                Err(error) => return Err(error),
            }
        }
    }

    fn response_media_type(&self, response: &ExchangeResponse) -> Result<MediaType, MediaError> {
        match response.content_type() {
            Some(value) => MediaType::parse(value),
            None => Ok(self.shared.request_media_type.clone()),
        }
    }

    fn decode(&self, type_name: &str, response: &ExchangeResponse) -> Result<Value, ClientError> {
        if response.body.is_empty() {
            return Ok(Value::Null);
        }
        let media_type = self.response_media_type(response)?;
        let codec = self
            .shared
            .codecs
            .reader_for(type_name, &media_type)
            .ok_or_else(|| MediaError::NoReader {
                type_name: type_name.to_string(),
                media_type: media_type.to_string(),
            })?;
        Ok(codec.read(&response.body)?)
    }

    fn decode_error(&self, response: ExchangeResponse) -> ClientError {
        let payload = self
            .decode(type_name::<ErrorPayload>(), &response)
            .ok()
            .and_then(|value| from_value::<ErrorPayload>(value).ok());
        match payload {
            Some(payload) => ClientError::Remote {
                status: response.status,
                payload,
            },
            None => ClientError::Status {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            },
        }
    }
}

impl fmt::Debug for ClientProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientProxy")
            .field("interface", &self.interface)
            .field("base", &self.routes.base().to_string())
            .field("methods", &self.routes.len())
            .field("transport", &self.shared.transport.name())
            .field("backoff", &self.shared.backoff.name())
            .finish()
    }
}

/// The type name a dynamic body is matched against when picking a writer.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => type_name::<String>(),
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "f64",
        Value::Number(_) => "i64",
        _ => type_name::<Value>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_type_name() {
        assert_eq!(value_type_name(&json!("a")), type_name::<String>());
        assert_eq!(value_type_name(&json!(1.5)), "f64");
        assert_eq!(value_type_name(&json!(3)), "i64");
        assert_eq!(value_type_name(&json!(false)), "bool");
        assert_eq!(value_type_name(&json!({"a": 1})), type_name::<Value>());
    }
}

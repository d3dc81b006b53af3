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

//! Pooled HTTP transport backed by `reqwest`.

use crate::transport::{
    CredentialStore, ExchangeRequest, ExchangeResponse, HttpTransport, TransportConfig,
    TransportError,
};
use async_trait::async_trait;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A transport sending real HTTP requests through a shared connection pool.
///
/// Pool size, idle connection lifetime, timeouts and per-server basic
/// authentication come from the [`TransportConfig`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    credentials: CredentialStore,
    request_timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Builds the connection pool described by `config`.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(config.max_pool_size());
        if let Some(ttl) = config.connection_ttl() {
            builder = builder.pool_idle_timeout(ttl);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = config.user_agent() {
            builder = builder.user_agent(agent.to_string());
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::invalid_configuration(e.to_string()))?;

        Ok(Self {
            client,
            credentials: config.credentials().clone(),
            request_timeout: config.request_timeout(),
        })
    }

    fn map_error(&self, request: &ExchangeRequest, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                duration: self.request_timeout.unwrap_or_default(),
            };
        }
        if error.is_connect() {
            return TransportError::ConnectionFailed {
                address: request.uri.origin().ascii_serialization(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, error.to_string()),
            };
        }
        if error.is_builder() {
            return TransportError::InvalidRequest {
                reason: error.to_string(),
            };
        }
        if let Some(kind) = io_error_kind(&error) {
            return TransportError::Io {
                source: io::Error::new(kind, error.to_string()),
            };
        }
        if error.is_body() || error.is_request() {
            return TransportError::ConnectionLost {
                reason: error.to_string(),
                source: None,
            };
        }
        TransportError::Protocol {
            reason: error.to_string(),
        }
    }
}

/// Kind of the first I/O error in the source chain, if any.
fn io_error_kind(error: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current = Some(error);
    while let Some(error) = current {
        if let Some(io_error) = error.downcast_ref::<io::Error>() {
            return Some(io_error.kind());
        }
        current = error.source();
    }
    None
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(verb = %request.verb, uri = %request.uri))]
    async fn exchange(&self, request: ExchangeRequest) -> Result<ExchangeResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.verb.clone(), request.uri.clone())
            .headers(request.headers.clone());
        if let Some(credentials) = self.credentials.for_url(&request.uri) {
            builder = builder.basic_auth(credentials.username(), Some(credentials.password()));
        }
        if let Some(body) = request.body.clone() {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = self.map_error(&request, e);
                warn!(error = %error, "exchange failed");
                return Err(error);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(&request, e))?;

        debug!(status = %status, bytes = body.len(), "exchange complete");
        Ok(ExchangeResponse {
            status,
            headers,
            body,
        })
    }

    fn name(&self) -> &str {
        "reqwest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TransportConfig::new().with_max_pool_size(0);
        assert!(matches!(
            ReqwestTransport::new(&config),
            Err(TransportError::InvalidConfiguration { .. })
        ));
    }

    #[derive(Debug)]
    struct Wrapped(io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "wrapped: {}", self.0)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_io_error_kind_walks_source_chain() {
        let error = Wrapped(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert_eq!(io_error_kind(&error), Some(io::ErrorKind::ConnectionReset));

        let mapped = TransportError::Io {
            source: io::Error::new(io_error_kind(&error).unwrap(), error.to_string()),
        };
        assert!(mapped.is_recoverable());

        let plain = TransportError::connection_lost("no io here");
        assert_eq!(io_error_kind(&plain), None);
    }

    #[test]
    fn test_new_with_defaults() {
        let transport = ReqwestTransport::new(&TransportConfig::default()).unwrap();
        assert_eq!(transport.name(), "reqwest");
    }
}

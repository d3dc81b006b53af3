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

//! Client factory and builder.

use crate::backoff::BackoffStrategy;
use crate::binding::{BindingError, RouteDecl, RouteTable};
use crate::client::ClientConfig;
use crate::client::proxy::{ClientProxy, ClientShared};
use crate::codec::{Codec, CodecRegistry, MediaError, MediaType};
use crate::observability::RequestVectorSource;
use crate::transport::{Credentials, HttpTransport, TransportError};
use http::header::HeaderValue;
use http::HeaderName;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// A client type generated by `#[restwire::client]`.
///
/// The generated struct wraps an [`Arc<ClientProxy>`] and forwards every
/// trait method to [`ClientProxy::invoke`].
pub trait BoundClient: Sized + Send + Sync + 'static {
    /// Simple name of the interface.
    const INTERFACE: &'static str;

    /// The route table rows of every method, in declaration order.
    fn routes() -> Vec<RouteDecl>;

    /// Wraps a proxy bound to this interface's routes.
    fn from_proxy(proxy: Arc<ClientProxy>) -> Self;

    /// The proxy behind this client.
    fn proxy(&self) -> &Arc<ClientProxy>;
}

/// Hands out bound clients that share one transport.
///
/// # Examples
///
/// ```rust,no_run
/// use restwire::client::ClientFactory;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), restwire::Error> {
/// let factory = ClientFactory::builder()
///     .max_pool_size(8)
///     .request_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClientFactory {
    shared: Arc<ClientShared>,
}

impl ClientFactory {
    /// Starts configuring a factory.
    pub fn builder() -> ClientFactoryBuilder {
        ClientFactoryBuilder::new()
    }

    /// Binds the routes of `C` against `base_uri`.
    ///
    /// Every route is validated before the client is returned.
    pub fn bind<C: BoundClient>(&self, base_uri: &str) -> Result<C, BindingError> {
        let proxy = self.proxy(C::INTERFACE, base_uri, C::routes())?;
        Ok(C::from_proxy(Arc::new(proxy)))
    }

    /// Binds a hand-written route table.
    pub fn proxy<I>(
        &self,
        interface: &str,
        base_uri: &str,
        routes: I,
    ) -> Result<ClientProxy, BindingError>
    where
        I: IntoIterator<Item = RouteDecl>,
    {
        let table = RouteTable::bind(base_uri, routes)?;
        info!(
            interface,
            base = %table.base(),
            methods = table.len(),
            "bound client"
        );
        Ok(ClientProxy::new(interface, table, self.shared.clone()))
    }

    /// The transport shared by every client of this factory.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.shared.transport
    }
}

impl fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientFactory")
            .field("transport", &self.shared.transport.name())
            .field("codecs", &self.shared.codecs)
            .field("backoff", &self.shared.backoff.name())
            .field("request_media_type", &self.shared.request_media_type)
            .finish()
    }
}

/// Builder for [`ClientFactory`].
///
/// Without an explicit [`transport`](Self::transport), `build` creates a
/// [`ReqwestTransport`](crate::transport::ReqwestTransport) from the
/// transport settings.
pub struct ClientFactoryBuilder {
    config: ClientConfig,
    codecs: Option<CodecRegistry>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientFactoryBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            codecs: None,
            transport: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn connection_ttl(mut self, ttl: Duration) -> Self {
        self.config.transport = self.config.transport.with_connection_ttl(ttl);
        self
    }

    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.config.transport = self.config.transport.with_max_pool_size(size);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.transport = self.config.transport.with_connect_timeout(timeout);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.transport = self.config.transport.with_request_timeout(timeout);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.transport = self.config.transport.with_user_agent(agent);
        self
    }

    /// Adds credentials for one authority.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.transport = self.config.transport.with_credentials(credentials);
        self
    }

    /// Sets the retry policy for recoverable transport failures.
    pub fn backoff(mut self, backoff: impl BackoffStrategy) -> Self {
        self.config.backoff = Arc::new(backoff);
        self
    }

    /// Appends a codec after any already registered.
    ///
    /// The first call replaces the default JSON and text codecs.
    pub fn codec(mut self, codec: impl Codec) -> Self {
        self.codecs
            .get_or_insert_with(CodecRegistry::new)
            .push(Arc::new(codec));
        self
    }

    /// Replaces the codec registry.
    pub fn codecs(mut self, codecs: CodecRegistry) -> Self {
        self.codecs = Some(codecs);
        self
    }

    pub fn request_media_type(mut self, media_type: MediaType) -> Self {
        self.config.request_media_type = media_type;
        self
    }

    /// Adds a header sent with every request.
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.config.default_headers.append(name, value);
        self
    }

    /// Uses the given transport instead of building one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validates the configuration and builds the factory.
    pub fn build(self) -> Result<ClientFactory, crate::Error> {
        self.config.validate()?;
        self.config.transport.validate()?;

        let codecs = self.codecs.unwrap_or_default();
        let request_media_type = self.config.request_media_type;
        if !codecs.iter().any(|codec| codec.supports(&request_media_type)) {
            return Err(MediaError::UnsupportedMediaType {
                media_type: request_media_type.to_string(),
            }
            .into());
        }

        let content_type = header_value(&request_media_type.to_string())?;
        let accept = header_value(&codecs.accept_header())?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.config.transport)?,
        };

        info!(
            transport = transport.name(),
            backoff = self.config.backoff.name(),
            request_media_type = %request_media_type,
            "built client factory"
        );

        Ok(ClientFactory {
            shared: Arc::new(ClientShared {
                transport,
                codecs,
                backoff: self.config.backoff,
                request_media_type,
                content_type,
                accept,
                default_headers: self.config.default_headers,
                vectors: RequestVectorSource::new(),
            }),
        })
    }
}

impl Default for ClientFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(value: &str) -> Result<HeaderValue, MediaError> {
    HeaderValue::from_str(value).map_err(|_| MediaError::InvalidMediaType {
        value: value.to_string(),
    })
}

#[cfg(feature = "reqwest")]
fn default_transport(
    config: &crate::transport::TransportConfig,
) -> Result<Arc<dyn HttpTransport>, TransportError> {
    Ok(Arc::new(crate::transport::ReqwestTransport::new(config)?))
}

#[cfg(not(feature = "reqwest"))]
fn default_transport(
    _config: &crate::transport::TransportConfig,
) -> Result<Arc<dyn HttpTransport>, TransportError> {
    Err(TransportError::invalid_configuration(
        "no transport given and the `reqwest` feature is disabled",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoff::NoRetry;
    use crate::binding::ParamDecl;
    use crate::codec::TextCodec;
    use crate::transport::MemoryTransport;
    use bytes::Bytes;
    use http::{Method, Response, StatusCode};

    fn loopback() -> Arc<dyn HttpTransport> {
        Arc::new(MemoryTransport::from_fn(|_request| async {
            Response::builder()
                .status(StatusCode::NO_CONTENT)
                .body(Bytes::new())
                .unwrap()
        }))
    }

    #[test]
    fn test_build_with_transport() {
        let factory = ClientFactory::builder()
            .transport(loopback())
            .backoff(NoRetry::new())
            .build()
            .unwrap();
        assert_eq!(factory.transport().name(), "memory");
        assert!(format!("{factory:?}").contains("NoRetry"));
    }

    #[test]
    fn test_wildcard_request_media_type_rejected() {
        let result = ClientFactory::builder()
            .transport(loopback())
            .request_media_type(MediaType::any())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_request_media_type_needs_codec() {
        let result = ClientFactory::builder()
            .transport(loopback())
            .codec(TextCodec::new())
            .build();
        assert!(matches!(
            result,
            Err(crate::Error::Media(MediaError::UnsupportedMediaType { .. }))
        ));
    }

    #[test]
    fn test_zero_pool_rejected() {
        let result = ClientFactory::builder()
            .transport(loopback())
            .max_pool_size(0)
            .build();
        assert!(matches!(result, Err(crate::Error::Transport(_))));
    }

    #[test]
    fn test_proxy_binds_routes() {
        let factory = ClientFactory::builder()
            .transport(loopback())
            .build()
            .unwrap();
        let proxy = factory
            .proxy(
                "Profiles",
                "http://host/api",
                vec![RouteDecl::new("getProfile")
                    .verb(Method::GET)
                    .path("/profile/{id}")
                    .param(ParamDecl::path("id", "id"))],
            )
            .unwrap();
        assert_eq!(proxy.interface(), "Profiles");
        assert_eq!(proxy.routes().len(), 1);

        let err = factory
            .proxy("Broken", "not a uri", Vec::new())
            .unwrap_err();
        assert!(matches!(err, BindingError::MalformedBaseUri { .. }));
    }
}

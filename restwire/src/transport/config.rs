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

//! Connection settings for pooled HTTP transports.

use crate::transport::{CredentialStore, Credentials, TransportError};
use std::time::Duration;

/// Default number of idle connections kept per host.
pub const DEFAULT_MAX_POOL_SIZE: usize = 20;

/// Connection pool, timeout and authentication settings.
///
/// # Examples
///
/// ```rust
/// use restwire::transport::TransportConfig;
/// use std::time::Duration;
///
/// let config = TransportConfig::new()
///     .with_max_pool_size(8)
///     .with_connection_ttl(Duration::from_secs(30))
///     .with_request_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.max_pool_size(), 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TransportConfig {
    connection_ttl: Option<Duration>,
    max_pool_size: usize,
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
    credentials: CredentialStore,
}

impl TransportConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// How long an idle pooled connection may live.
    pub fn with_connection_ttl(mut self, ttl: Duration) -> Self {
        self.connection_ttl = Some(ttl);
        self
    }

    /// Maximum idle connections kept per host.
    pub fn with_max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Timeout for establishing a connection.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Timeout for a complete exchange.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// `User-Agent` sent with every request.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Adds basic authentication credentials for one server.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials.insert(credentials);
        self
    }

    pub fn connection_ttl(&self) -> Option<Duration> {
        self.connection_ttl
    }

    pub fn max_pool_size(&self) -> usize {
        self.max_pool_size
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Checks that the settings describe a usable pool.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.max_pool_size == 0 {
            return Err(TransportError::invalid_configuration(
                "max_pool_size must be greater than zero",
            ));
        }
        if self.connection_ttl.is_some_and(|ttl| ttl.is_zero()) {
            return Err(TransportError::invalid_configuration(
                "connection_ttl must be greater than zero",
            ));
        }
        for (name, timeout) in [
            ("connect_timeout", self.connect_timeout),
            ("request_timeout", self.request_timeout),
        ] {
            if timeout.is_some_and(|t| t.is_zero()) {
                return Err(TransportError::invalid_configuration(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connection_ttl: None,
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            connect_timeout: None,
            request_timeout: None,
            user_agent: None,
            credentials: CredentialStore::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = TransportConfig::default();
        assert_eq!(config.max_pool_size(), DEFAULT_MAX_POOL_SIZE);
        assert!(config.connection_ttl().is_none());
        assert!(config.credentials().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(TransportConfig::new().with_max_pool_size(0).validate().is_err());
        assert!(
            TransportConfig::new()
                .with_connection_ttl(Duration::ZERO)
                .validate()
                .is_err()
        );
        assert!(
            TransportConfig::new()
                .with_request_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_credentials_are_collected() {
        let config = TransportConfig::new()
            .with_credentials(Credentials::new("http://a.example", "a", "1").unwrap())
            .with_credentials(Credentials::new("http://b.example", "b", "2").unwrap());
        assert_eq!(config.credentials().len(), 2);
    }
}

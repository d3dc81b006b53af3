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

//! Configuration types for client factories.

use crate::backoff::{BackoffStrategy, TruncatedExponential};
use crate::codec::{MediaError, MediaType};
use crate::transport::TransportConfig;
use http::HeaderMap;
use std::sync::Arc;

/// Settings shared by every client a factory hands out.
#[derive(Clone)]
pub struct ClientConfig {
    /// Connection pool, timeout and credential settings.
    pub transport: TransportConfig,

    /// Media type request bodies are encoded as.
    pub request_media_type: MediaType,

    /// Headers added to every request.
    pub default_headers: HeaderMap,

    /// Retry policy for recoverable transport failures.
    pub backoff: Arc<dyn BackoffStrategy>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            request_media_type: MediaType::application_json(),
            default_headers: HeaderMap::new(),
            backoff: Arc::new(TruncatedExponential::default()),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("transport", &self.transport)
            .field("request_media_type", &self.request_media_type)
            .field("default_headers", &self.default_headers)
            .field("backoff", &self.backoff.name())
            .finish()
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_request_media_type(mut self, media_type: MediaType) -> Self {
        self.request_media_type = media_type;
        self
    }

    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_backoff(mut self, backoff: Arc<dyn BackoffStrategy>) -> Self {
        self.backoff = backoff;
        self
    }

    /// Checks that request bodies have a concrete media type.
    pub fn validate(&self) -> Result<(), MediaError> {
        if self.request_media_type.is_wildcard() {
            return Err(MediaError::InvalidMediaType {
                value: self.request_media_type.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = ClientConfig::default();
        assert_eq!(config.request_media_type, MediaType::application_json());
        assert!(config.default_headers.is_empty());
        assert_eq!(config.backoff.name(), "TruncatedExponential");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wildcard_request_type_rejected() {
        let config = ClientConfig::new().with_request_media_type(MediaType::any());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_names_backoff() {
        let debug = format!("{:?}", ClientConfig::default());
        assert!(debug.contains("TruncatedExponential"));
    }
}

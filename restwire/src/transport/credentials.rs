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

//! Basic authentication credentials keyed by server authority.

use crate::transport::TransportError;
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Username and password for one server.
///
/// The credentials apply to every request whose host, port and scheme
/// match `base_uri`; the path of `base_uri` is ignored.
///
/// # Examples
///
/// ```rust
/// use restwire::transport::Credentials;
///
/// let creds = Credentials::new("https://api.example.com/v1", "svc", "hunter2").unwrap();
/// assert_eq!(creds.authority(), "api.example.com:443:https");
/// assert!(!format!("{:?}", creds).contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    authority: String,
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials for the server named by `base_uri`.
    pub fn new(
        base_uri: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let url = Url::parse(base_uri).map_err(|e| {
            TransportError::invalid_configuration(format!(
                "invalid credentials uri `{}`: {}",
                base_uri, e
            ))
        })?;
        let authority = authority_key(&url).ok_or_else(|| {
            TransportError::invalid_configuration(format!(
                "credentials uri `{}` has no host",
                base_uri
            ))
        })?;
        Ok(Self {
            authority,
            username: username.into(),
            password: password.into(),
        })
    }

    /// The `host:port:scheme` key these credentials apply to.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("authority", &self.authority)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Credentials indexed by authority.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    by_authority: HashMap<String, Credentials>,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds credentials, replacing any for the same authority.
    pub fn insert(&mut self, credentials: Credentials) {
        self.by_authority
            .insert(credentials.authority.clone(), credentials);
    }

    /// Finds the credentials for the server a URL points at.
    pub fn for_url(&self, url: &Url) -> Option<&Credentials> {
        authority_key(url).and_then(|key| self.by_authority.get(&key))
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.by_authority.len()
    }

    /// Returns `true` if no credentials are stored.
    pub fn is_empty(&self) -> bool {
        self.by_authority.is_empty()
    }
}

/// Builds the `host:port:scheme` key for a URL, filling in the scheme's
/// default port.
pub fn authority_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{}:{}:{}", host, port, url.scheme()))
}

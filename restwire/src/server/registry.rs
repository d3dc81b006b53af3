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


//! The name to method map behind a dispatcher.

use crate::binding::BindingError;
use crate::server::{RpcMethodDecl, RpcService};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

/// Every exposed method, keyed by wire name.
///
/// Built once by [`RpcRegistryBuilder`] and only read afterwards.
///
/// # Examples
///
/// ```rust
/// use restwire::server::{RpcMethodDecl, RpcRegistry, ServiceError};
///
/// let registry = RpcRegistry::builder()
///     .method(RpcMethodDecl::new("echo", |s: String| async move {
///         Ok::<_, ServiceError>(s)
///     }))
///     .build()
///     .unwrap();
///
/// assert!(registry.get("echo").is_some());
/// assert!(registry.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RpcRegistry {
    methods: HashMap<String, RpcMethodDecl>,
}

impl RpcRegistry {
    pub fn builder() -> RpcRegistryBuilder {
        RpcRegistryBuilder::default()
    }

    /// Looks up a method by wire name.
    pub fn get(&self, name: &str) -> Option<&RpcMethodDecl> {
        self.methods.get(name)
    }

    /// Wire names of every method, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Builder for [`RpcRegistry`].
///
/// When two methods share a wire name the one registered last is kept and
/// a warning is logged. [`strict_overloads`](Self::strict_overloads) turns
/// the collision into [`BindingError::DuplicateMethod`].
#[derive(Debug, Default)]
pub struct RpcRegistryBuilder {
    decls: Vec<RpcMethodDecl>,
    strict_overloads: bool,
}

impl RpcRegistryBuilder {
    /// Adds one method.
    pub fn method(mut self, decl: RpcMethodDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Adds every method of a service.
    pub fn service(mut self, service: impl RpcService) -> Self {
        debug!(interface = service.interface(), "registering service");
        self.decls.extend(service.methods());
        self
    }

    /// Rejects methods that share a wire name.
    pub fn strict_overloads(mut self, strict: bool) -> Self {
        self.strict_overloads = strict;
        self
    }

    /// Validates every method and builds the registry.
    pub fn build(self) -> Result<RpcRegistry, BindingError> {
        let mut methods = HashMap::with_capacity(self.decls.len());
        for decl in self.decls {
            if decl.arity() != 1 || decl.invoker().is_none() {
                return Err(BindingError::OnlyOneParameterSupported {
                    method: decl.name().to_string(),
                    arity: decl.arity(),
                });
            }
            match methods.entry(decl.name().to_string()) {
                Entry::Occupied(mut entry) => {
                    if self.strict_overloads {
                        return Err(BindingError::DuplicateMethod {
                            method: entry.key().clone(),
                        });
                    }
                    warn!(
                        method = %entry.key(),
                        "method registered more than once, keeping the last"
                    );
                    entry.insert(decl);
                }
                Entry::Vacant(entry) => {
                    entry.insert(decl);
                }
            }
        }
        Ok(RpcRegistry { methods })
    }
}

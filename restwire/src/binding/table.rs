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

//! Per-interface descriptor tables.

use crate::binding::{BaseUri, BindingError, MethodBindingDescriptor, RouteDecl};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

/// Every method of one interface bound against one base URI.
///
/// Built once when a client is created and only read afterwards.
///
/// # Examples
///
/// ```rust
/// use restwire::binding::{ParamDecl, RouteDecl, RouteTable};
/// use http::Method;
///
/// let table = RouteTable::bind(
///     "http://host/api",
///     vec![
///         RouteDecl::new("list").verb(Method::GET).path("/items"),
///         RouteDecl::new("get").path("/items/{id}").param(ParamDecl::path("id", "id")),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert!(table.get("list").is_some());
/// assert!(table.get("delete").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    base: BaseUri,
    descriptors: HashMap<String, MethodBindingDescriptor>,
}

impl RouteTable {
    /// Validates every route and binds it against `base_uri`.
    ///
    /// The first invalid route aborts the whole table.
    pub fn bind<I>(base_uri: &str, routes: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = RouteDecl>,
    {
        let base = BaseUri::parse(base_uri)?;
        let mut descriptors = HashMap::new();
        for route in routes {
            let descriptor = MethodBindingDescriptor::bind(&base, &route)?;
            match descriptors.entry(route.method) {
                Entry::Occupied(entry) => {
                    return Err(BindingError::DuplicateRoute {
                        method: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    debug!(
                        method = %descriptor.method(),
                        verb = %descriptor.verb(),
                        template = %descriptor.uri().template(),
                        "bound route"
                    );
                    entry.insert(descriptor);
                }
            }
        }
        Ok(Self { base, descriptors })
    }

    /// The base URI every route was bound against.
    pub fn base(&self) -> &BaseUri {
        &self.base
    }

    /// Looks up a method's descriptor.
    pub fn get(&self, method: &str) -> Option<&MethodBindingDescriptor> {
        self.descriptors.get(method)
    }

    /// Names of every bound method, in no particular order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

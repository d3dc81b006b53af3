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

//! Route declarations.
//!
//! A [`RouteDecl`] is the raw, unvalidated description of one interface
//! method as written in its annotations. `#[restwire::client]` emits one per
//! trait method; they can also be written by hand. Validation happens in
//! [`MethodBindingDescriptor::bind`](crate::binding::MethodBindingDescriptor::bind).

use http::Method;
use std::fmt;

/// How a parameter contributes to the request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamRole {
    /// Fills the named `{placeholder}` in the path.
    PathVariable(String),
    /// Appended to the query string under the given key.
    QueryParam(String),
    /// Encoded as the request body.
    Body,
}

/// Routing qualifiers that narrow a mapping beyond verb and path.
///
/// These are recognized so that they can be rejected with a clear error;
/// none of them is supported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteQualifier {
    Consumes(String),
    Produces(String),
    Headers(String),
    Params(String),
}

impl fmt::Display for RouteQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumes(v) => write!(f, "consumes = {:?}", v),
            Self::Produces(v) => write!(f, "produces = {:?}", v),
            Self::Headers(v) => write!(f, "headers = {:?}", v),
            Self::Params(v) => write!(f, "params = {:?}", v),
        }
    }
}

/// One declared method parameter and its roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub roles: Vec<ParamRole>,
}

impl ParamDecl {
    /// A parameter without any role.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
        }
    }

    /// A parameter bound to the path variable `variable`.
    pub fn path(name: impl Into<String>, variable: impl Into<String>) -> Self {
        Self::new(name).role(ParamRole::PathVariable(variable.into()))
    }

    /// A parameter bound to the query key `key`.
    pub fn query(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(name).role(ParamRole::QueryParam(key.into()))
    }

    /// A parameter used as the body.
    pub fn body(name: impl Into<String>) -> Self {
        Self::new(name).role(ParamRole::Body)
    }

    /// Adds a role.
    pub fn role(mut self, role: ParamRole) -> Self {
        self.roles.push(role);
        self
    }
}

/// The declared route of one interface method.
///
/// # Examples
///
/// ```rust
/// use restwire::binding::{ParamDecl, RouteDecl};
/// use http::Method;
///
/// let route = RouteDecl::new("get_profile")
///     .verb(Method::GET)
///     .path("/profile/{id}")
///     .param(ParamDecl::path("id", "id"));
///
/// assert_eq!(route.arity(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecl {
    pub method: String,
    pub verbs: Vec<Method>,
    pub paths: Vec<String>,
    pub params: Vec<ParamDecl>,
    pub qualifiers: Vec<RouteQualifier>,
}

impl RouteDecl {
    /// A declaration with no verb, path, parameters or qualifiers.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            verbs: Vec::new(),
            paths: Vec::new(),
            params: Vec::new(),
            qualifiers: Vec::new(),
        }
    }

    /// Adds a verb.
    pub fn verb(mut self, verb: Method) -> Self {
        self.verbs.push(verb);
        self
    }

    /// Adds a path template.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Adds the next positional parameter.
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a qualifier.
    pub fn qualifier(mut self, qualifier: RouteQualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Number of positional parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

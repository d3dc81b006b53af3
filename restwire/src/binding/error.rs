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

//! Binding error types.
//!
//! [`BindingError`] is raised while turning route declarations into
//! descriptors or registering RPC methods. It always aborts construction:
//! no partially bound client or dispatcher is ever produced.
//!
//! [`ArgumentError`] is raised per call, when the arguments of one
//! invocation cannot be rendered into a URI.

use thiserror::Error;

/// Errors detected while binding an interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A method declares more than one HTTP verb.
    #[error("method `{method}` declares more than one HTTP verb: {verbs:?}")]
    AmbiguousVerb {
        /// The offending method
        method: String,
        /// Every declared verb
        verbs: Vec<String>,
    },

    /// A method declares more than one path.
    #[error("method `{method}` declares more than one path: {paths:?}")]
    AmbiguousPath {
        /// The offending method
        method: String,
        /// Every declared path
        paths: Vec<String>,
    },

    /// More than one parameter is marked as the request body.
    #[error("method `{method}` has more than one body parameter")]
    DuplicateBody {
        /// The offending method
        method: String,
    },

    /// A parameter carries no binding role.
    #[error("parameter `{parameter}` of method `{method}` has no path, query or body role")]
    UnrecognizedParameter {
        /// The offending method
        method: String,
        /// The unannotated parameter
        parameter: String,
    },

    /// A parameter carries more than one binding role.
    #[error("parameter `{parameter}` of method `{method}` has conflicting roles")]
    ConflictingParameterRoles {
        /// The offending method
        method: String,
        /// The over-annotated parameter
        parameter: String,
    },

    /// A method uses a routing qualifier that cannot be honored.
    #[error("method `{method}` uses unsupported qualifier `{qualifier}`")]
    UnsupportedQualifier {
        /// The offending method
        method: String,
        /// The qualifier and its value
        qualifier: String,
    },

    /// The base URI does not parse or cannot carry a path.
    #[error("malformed base uri `{uri}`: {reason}")]
    MalformedBaseUri {
        /// The rejected URI
        uri: String,
        /// Why it was rejected
        reason: String,
    },

    /// A path template does not parse.
    #[error("invalid path template `{template}`: {reason}")]
    InvalidTemplate {
        /// The rejected template
        template: String,
        /// Why it was rejected
        reason: String,
    },

    /// A parameter names a path variable the template does not contain.
    #[error("method `{method}` binds unknown path variable `{variable}`")]
    UnknownPathVariable {
        /// The offending method
        method: String,
        /// The missing placeholder
        variable: String,
    },

    /// A template placeholder is not bound by any parameter.
    #[error("path variable `{variable}` of method `{method}` is not bound to a parameter")]
    UnboundPathVariable {
        /// The offending method
        method: String,
        /// The unbound placeholder
        variable: String,
    },

    /// The same method name appears twice in one route table.
    #[error("method `{method}` is declared more than once")]
    DuplicateRoute {
        /// The repeated method
        method: String,
    },

    /// An RPC method does not take exactly one parameter.
    #[error("rpc method `{method}` takes {arity} parameters, only one is supported")]
    OnlyOneParameterSupported {
        /// The offending method
        method: String,
        /// Its declared parameter count
        arity: usize,
    },

    /// Two RPC methods share a wire name and overloads are rejected.
    #[error("rpc method `{method}` is registered more than once")]
    DuplicateMethod {
        /// The repeated wire name
        method: String,
    },
}

impl BindingError {
    /// The method the error is about, if it concerns a single method.
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::AmbiguousVerb { method, .. }
            | Self::AmbiguousPath { method, .. }
            | Self::DuplicateBody { method }
            | Self::UnrecognizedParameter { method, .. }
            | Self::ConflictingParameterRoles { method, .. }
            | Self::UnsupportedQualifier { method, .. }
            | Self::UnknownPathVariable { method, .. }
            | Self::UnboundPathVariable { method, .. }
            | Self::DuplicateRoute { method }
            | Self::OnlyOneParameterSupported { method, .. }
            | Self::DuplicateMethod { method } => Some(method),
            Self::MalformedBaseUri { .. } | Self::InvalidTemplate { .. } => None,
        }
    }
}

/// Errors raised when one call's arguments cannot be placed in the URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// A path variable received `null`.
    #[error("path variable `{name}` has no value")]
    MissingPathVariable {
        /// The placeholder name
        name: String,
    },

    /// An argument has no textual form in its position.
    #[error("argument `{name}` cannot be used in the uri: {reason}")]
    InvalidArgument {
        /// The parameter name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// The call supplied fewer arguments than the method declares.
    #[error("method `{method}` expects {expected} arguments, got {actual}")]
    ArityMismatch {
        /// The invoked method
        method: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },
}

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


//! RPC method table rows.

use crate::codec::{DeserializationError, SerializationError, from_value, to_value};
use crate::server::ServiceError;
use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::type_name;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Future returned by an [`Invoker`].
pub type InvocationFuture = BoxFuture<'static, Result<Value, InvocationError>>;

/// Type-erased entry point of one RPC method.
pub type Invoker = Arc<dyn Fn(Value) -> InvocationFuture + Send + Sync>;

/// Failures of a single invocation after the method was found.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The decoded body does not match the method's input type.
    #[error("input does not match the method signature: {0}")]
    Input(#[source] DeserializationError),

    /// The method's result could not be converted for encoding.
    #[error("result could not be encoded: {0}")]
    Output(#[source] SerializationError),

    /// The method returned a domain error.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// One exposed method: its wire name, signature and entry point.
///
/// Rows are produced by `#[restwire::rpc]` or written by hand with
/// [`RpcMethodDecl::new`].
///
/// # Examples
///
/// ```rust
/// use restwire::server::{RpcMethodDecl, ServiceError};
///
/// let decl = RpcMethodDecl::new("double", |x: i64| async move {
///     Ok::<_, ServiceError>(x * 2)
/// });
/// assert_eq!(decl.name(), "double");
/// assert_eq!(decl.arity(), 1);
/// assert_eq!(decl.input_type(), "i64");
/// ```
#[derive(Clone)]
pub struct RpcMethodDecl {
    name: String,
    arity: usize,
    input_type: &'static str,
    output_type: &'static str,
    invoker: Option<Invoker>,
}

impl RpcMethodDecl {
    /// Creates a single-argument method from an async function.
    pub fn new<I, O, E, F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        I: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
        E: Into<ServiceError> + Send + 'static,
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
    {
        let f = Arc::new(f);
        let invoker: Invoker = Arc::new(move |input: Value| -> InvocationFuture {
            let f = f.clone();
            Box::pin(async move {
                let input: I = from_value(input).map_err(InvocationError::Input)?;
                let output = f(input).await.map_err(|e| InvocationError::Service(e.into()))?;
                to_value(&output).map_err(InvocationError::Output)
            })
        });
        Self {
            name: name.into(),
            arity: 1,
            input_type: type_name::<I>(),
            output_type: type_name::<O>(),
            invoker: Some(invoker),
        }
    }

    /// A method whose signature cannot be exposed.
    ///
    /// Registering it fails with
    /// [`OnlyOneParameterSupported`](crate::binding::BindingError::OnlyOneParameterSupported).
    pub fn unsupported(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            input_type: "",
            output_type: "",
            invoker: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Type name of the decoded argument, used to pick a reader.
    pub fn input_type(&self) -> &'static str {
        self.input_type
    }

    /// Type name of the result, used to pick a writer.
    pub fn output_type(&self) -> &'static str {
        self.output_type
    }

    pub(crate) fn invoker(&self) -> Option<&Invoker> {
        self.invoker.as_ref()
    }
}

impl fmt::Debug for RpcMethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcMethodDecl")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("input_type", &self.input_type)
            .field("output_type", &self.output_type)
            .finish()
    }
}

/// A service implementation exposed as a set of RPC methods.
///
/// Implemented by the `{Trait}Rpc` wrapper that `#[restwire::rpc]`
/// generates.
pub trait RpcService: Send + Sync + 'static {
    /// Simple name of the exposed interface.
    fn interface(&self) -> &'static str;

    /// Every method of the interface, in declaration order.
    fn methods(&self) -> Vec<RpcMethodDecl>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_invoker_round_trip() {
        let decl = RpcMethodDecl::new("len", |s: String| async move {
            Ok::<_, ServiceError>(s.len())
        });
        let invoker = decl.invoker().unwrap();
        assert_eq!(invoker(json!("four")).await.unwrap(), json!(4));
        assert_eq!(decl.output_type(), "usize");
    }

    #[tokio::test]
    async fn test_invoker_input_mismatch() {
        let decl = RpcMethodDecl::new("len", |s: String| async move {
            Ok::<_, ServiceError>(s.len())
        });
        let result = decl.invoker().unwrap()(json!({"not": "a string"})).await;
        assert!(matches!(result, Err(InvocationError::Input(_))));
    }

    #[tokio::test]
    async fn test_invoker_service_error() {
        let decl = RpcMethodDecl::new("fail", |_: ()| async move {
            Err::<(), _>(ServiceError::unsupported("not here"))
        });
        let result = decl.invoker().unwrap()(Value::Null).await;
        match result {
            Err(InvocationError::Service(e)) => assert_eq!(e.code(), "Unsupported"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_has_no_invoker() {
        let decl = RpcMethodDecl::unsupported("pair", 2);
        assert_eq!(decl.arity(), 2);
        assert!(decl.invoker().is_none());
    }
}

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


//! Observability support for RESTWire.
//!
//! # Overview
//!
//! - **[`RequestVector`]**: hierarchical trace identifier carried in the
//!   `x-request-vector` header
//! - **[`RequestVectorSource`]**: numbers the children of a vector
//! - **[`RequestContext`]**: the vector of the request being handled, as a
//!   task-local
//! - **[`log_error`]**: structured logging of [`Error`](crate::Error)
//!
//! # Request Vectors
//!
//! A vector is a root followed by dot-separated hex counters. Each hop that
//! makes an outbound call appends one counter, so the chain of calls behind
//! a request can be reconstructed from the logs:
//!
//! ```rust
//! use restwire::observability::{RequestVector, RequestVectorSource};
//!
//! let root = RequestVector::new("7f3a").unwrap();
//! let source = RequestVectorSource::new();
//!
//! let first = source.next_child(&root);
//! let nested = source.next_child(&first);
//! assert_eq!(nested.to_string(), "7f3a.1.2");
//! assert_eq!(nested.parent(), Some(first));
//! ```
//!
//! # Propagation
//!
//! The dispatcher runs every method inside [`RequestContext::scope`], and
//! client proxies called from there send the next child of the current
//! vector. Work handed to other tasks keeps the vector only when spawned
//! through [`RequestContext::spawn`]:
//!
//! ```rust
//! use restwire::observability::{RequestContext, RequestVector};
//!
//! # async fn example() {
//! let vector = RequestVector::new("root").unwrap();
//! RequestContext::scope(vector.clone(), async move {
//!     let seen = RequestContext::spawn(async { RequestContext::current() })
//!         .await
//!         .unwrap();
//!     assert_eq!(seen, Some(vector));
//! })
//! .await;
//! # }
//! ```

mod context;
mod request_vector;

pub use context::RequestContext;
pub use request_vector::{
    REQUEST_VECTOR_HEADER, RequestVector, RequestVectorError, RequestVectorSource,
};

use crate::Error;

/// Logs an error with structured fields for its layer.
///
/// Failures the caller caused are logged below `error` level so that only
/// server-side faults page anyone.
///
/// # Examples
///
/// ```rust
/// use restwire::observability::log_error;
/// use restwire::transport::TransportError;
///
/// log_error(&TransportError::Closed.into());
/// ```
pub fn log_error(error: &Error) {
    let context = RequestContext::current().map(|vector| vector.to_string());
    match error {
        Error::Binding(e) => {
            tracing::error!(
                error = %e,
                method = ?e.method(),
                "Binding error occurred"
            );
        }
        Error::Client(e) => {
            tracing::warn!(
                error = %e,
                status = ?e.status(),
                recoverable = e.is_recoverable(),
                request_vector = ?context,
                "Client call failed"
            );
        }
        Error::Dispatch(e) => {
            if e.is_server_error() {
                tracing::error!(
                    error = %e,
                    status = %e.status(),
                    request_vector = ?context,
                    "Dispatch failed"
                );
            } else {
                tracing::info!(
                    error = %e,
                    status = %e.status(),
                    request_vector = ?context,
                    "Request rejected"
                );
            }
        }
        Error::Transport(e) => {
            tracing::error!(
                error = %e,
                recoverable = e.is_recoverable(),
                "Transport error occurred"
            );
        }
        Error::Backoff(e) => {
            tracing::error!(error = %e, "Invalid backoff strategy");
        }
        Error::Media(e) => {
            tracing::warn!(error = %e, "Media type negotiation failed");
        }
        Error::RequestVector(e) => {
            tracing::warn!(error = %e, "Malformed request vector");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingError;
    use crate::server::DispatchError;
    use crate::transport::TransportError;

    #[test]
    fn test_log_transport_error() {
        log_error(&Error::Transport(TransportError::Closed));
    }

    #[test]
    fn test_log_binding_error() {
        log_error(&Error::Binding(BindingError::DuplicateBody {
            method: "put".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_log_dispatch_error_in_context() {
        let vector = RequestVector::new("root").unwrap();
        RequestContext::scope(vector, async {
            log_error(&Error::Dispatch(DispatchError::NotFound {
                method: "missing".to_string(),
            }));
        })
        .await;
    }
}

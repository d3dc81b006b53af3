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


//! Integration tests for error classification and logging.
//!
//! These tests verify that errors from every layer compose into
//! [`restwire::Error`] and keep their classification.

use restwire::Error;
use restwire::binding::BindingError;
use restwire::client::ClientError;
use restwire::server::{DispatchError, ServiceError};
use restwire::transport::TransportError;
use std::error::Error as StdError;
use std::time::Duration;

/// Test that binding errors are configuration errors.
#[test]
fn test_binding_error_classification() {
    let error = Error::from(BindingError::DuplicateRoute {
        method: "get".to_string(),
    });
    assert!(error.is_binding_error());
    assert!(error.is_configuration_error());
    assert!(!error.is_retryable());
    assert!(error.to_string().starts_with("binding error:"));
}

/// Test that transport recoverability carries through client errors.
#[test]
fn test_retryable_through_client_error() {
    let timeout = TransportError::Timeout {
        duration: Duration::from_secs(1),
    };
    let error = Error::from(ClientError::from(timeout));
    assert!(error.is_client_error());
    assert!(error.is_retryable());

    let error = Error::from(ClientError::from(TransportError::Closed));
    assert!(!error.is_retryable());
}

/// Test that the source chain reaches the innermost error.
#[test]
fn test_source_chain() {
    let error = Error::from(DispatchError::Service {
        method: "sayHello".to_string(),
        source: ServiceError::access_denied("no"),
    });
    assert!(error.is_dispatch_error());

    let dispatch = error.source().unwrap();
    let service = dispatch.source().unwrap();
    assert_eq!(service.to_string(), "AccessDenied: no");
}

/// Test that invalid transport configuration is a configuration error.
#[test]
fn test_invalid_transport_configuration() {
    let error = Error::from(TransportError::invalid_configuration("pool size 0"));
    assert!(error.is_transport_error());
    assert!(error.is_configuration_error());
    assert!(!error.is_retryable());
}

/// Test that logging accepts every layer without a subscriber installed.
#[test]
fn test_log_error_every_layer() {
    let errors = vec![
        Error::from(BindingError::DuplicateRoute {
            method: "get".to_string(),
        }),
        Error::from(ClientError::from(TransportError::Closed)),
        Error::from(DispatchError::NotFound {
            method: "frobnicate".to_string(),
        }),
        Error::from(TransportError::Closed),
    ];
    for error in &errors {
        restwire::log_error(error);
    }
}

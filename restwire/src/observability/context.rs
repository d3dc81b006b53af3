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

//! Task-local request context.
//!
//! The dispatcher runs every invocation inside [`RequestContext::scope`] so
//! that client calls made while handling a request carry a child of the
//! incoming request vector.

use crate::observability::RequestVector;
use std::future::Future;
use tokio::task::JoinHandle;

tokio::task_local! {
    static REQUEST_VECTOR: RequestVector;
}

/// Access to the request vector of the current task.
///
/// # Examples
///
/// ```rust
/// use restwire::observability::{RequestContext, RequestVector};
///
/// # async fn example() {
/// assert!(RequestContext::current().is_none());
///
/// let vector = RequestVector::new("root").unwrap();
/// RequestContext::scope(vector.clone(), async move {
///     assert_eq!(RequestContext::current(), Some(vector));
/// })
/// .await;
/// # }
/// ```
pub struct RequestContext;

impl RequestContext {
    /// The vector of the request being handled, if any.
    pub fn current() -> Option<RequestVector> {
        REQUEST_VECTOR.try_with(Clone::clone).ok()
    }

    /// Runs `future` with `vector` as the current request vector.
    pub async fn scope<F, T>(vector: RequestVector, future: F) -> T
    where
        F: Future<Output = T>,
    {
        REQUEST_VECTOR.scope(vector, future).await
    }

    /// Spawns a task that inherits the current request vector.
    ///
    /// The vector is captured when `spawn` is called, not when the task
    /// first runs.
    pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        match Self::current() {
            Some(vector) => tokio::spawn(REQUEST_VECTOR.scope(vector, future)),
            None => tokio::spawn(future),
        }
    }
}

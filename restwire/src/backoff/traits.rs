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

//! Backoff trait definitions.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A retry policy shared by every call made through a client.
///
/// The strategy itself is immutable. Each logical call asks it for a fresh
/// [`BackoffMark`] which tracks the progress of that one call, so concurrent
/// calls never observe each other's retry state.
///
/// # Examples
///
/// ```rust
/// use restwire::backoff::{BackoffStrategy, NoRetry};
///
/// let strategy = NoRetry::new();
/// let mut mark = strategy.new_mark();
/// assert_eq!(mark.next_retry_time(), None);
/// ```
pub trait BackoffStrategy: Send + Sync + fmt::Debug + 'static {
    /// Starts tracking a new call.
    fn new_mark(&self) -> Box<dyn BackoffMark>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// Per-call retry state.
pub trait BackoffMark: Send {
    /// Delay to wait before the next attempt, or `None` to stop retrying.
    ///
    /// `None` is the only stop signal; `Some(Duration::ZERO)` retries at
    /// once. Once a mark returns `None` it keeps returning `None`.
    fn next_retry_time(&mut self) -> Option<Duration>;
}

/// Errors raised while configuring a backoff strategy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackoffError {
    /// The step must be longer than zero.
    #[error("backoff step must be greater than zero")]
    ZeroStep,

    /// The multiplier must be a finite number above one.
    #[error("backoff multiplier must be finite and greater than 1, got {multiplier}")]
    InvalidMultiplier {
        /// The rejected multiplier
        multiplier: f64,
    },

    /// The maximum delay must be longer than zero.
    #[error("backoff maximum must be greater than zero")]
    ZeroMax,

    /// The first delay must be longer than zero.
    #[error("backoff start must be greater than zero")]
    ZeroStart,
}

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

//! Truncated exponential backoff.
//!
//! Delays start at `start` and grow by a step that is itself multiplied on
//! every retry. Retrying stops for good as soon as the next delay would
//! exceed `max`.

use crate::backoff::{BackoffError, BackoffMark, BackoffStrategy};
use std::time::Duration;

/// Exponential backoff that stops once the delay passes a ceiling.
///
/// With `start = 50ms`, `step = 50ms`, `multiplier = 2` and `max = 1s` the
/// delays are 50, 100, 200, 400 and 800 milliseconds, after which the mark
/// reports that no further retry should happen.
///
/// # Examples
///
/// ```rust
/// use restwire::backoff::{BackoffStrategy, TruncatedExponential};
/// use std::time::Duration;
///
/// let strategy = TruncatedExponential::builder()
///     .start(Duration::from_millis(50))
///     .step(Duration::from_millis(50))
///     .multiplier(2.0)
///     .max(Duration::from_secs(1))
///     .build()
///     .unwrap();
///
/// let mut mark = strategy.new_mark();
/// assert_eq!(mark.next_retry_time(), Some(Duration::from_millis(50)));
/// assert_eq!(mark.next_retry_time(), Some(Duration::from_millis(100)));
/// ```
#[derive(Debug, Clone)]
pub struct TruncatedExponential {
    start: Duration,
    step: Duration,
    multiplier: f64,
    max: Duration,
}

impl Default for TruncatedExponential {
    fn default() -> Self {
        Self {
            start: Duration::from_millis(50),
            step: Duration::from_millis(50),
            multiplier: 2.0,
            max: Duration::from_secs(5),
        }
    }
}

impl TruncatedExponential {
    /// Creates a new builder seeded with the default parameters.
    pub fn builder() -> TruncatedExponentialBuilder {
        TruncatedExponentialBuilder::default()
    }

    /// The first delay.
    pub fn start(&self) -> Duration {
        self.start
    }

    /// The initial growth step.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// The factor applied to the step after each retry.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The ceiling past which retrying stops.
    pub fn max(&self) -> Duration {
        self.max
    }
}

impl BackoffStrategy for TruncatedExponential {
    fn new_mark(&self) -> Box<dyn BackoffMark> {
        Box::new(ExponentialMark {
            current: self.start.as_nanos(),
            step: self.step.as_nanos(),
            multiplier: self.multiplier,
            max: self.max.as_nanos(),
            exhausted: false,
        })
    }

    fn name(&self) -> &str {
        "TruncatedExponential"
    }
}

/// Delays are kept in whole nanoseconds; only the step growth goes through
/// the multiplier, rounded back to an integer each time.
#[derive(Debug)]
struct ExponentialMark {
    current: u128,
    step: u128,
    multiplier: f64,
    max: u128,
    exhausted: bool,
}

impl BackoffMark for ExponentialMark {
    fn next_retry_time(&mut self) -> Option<Duration> {
        if self.exhausted || self.current > self.max {
            self.exhausted = true;
            return None;
        }
        let delay = from_nanos(self.current);
        self.current = self.current.saturating_add(self.step);
        self.step = scale(self.step, self.multiplier);
        Some(delay)
    }
}

/// Only called with values no larger than a `Duration`'s nanosecond count.
fn from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

/// Float to integer `as` casts saturate, so huge steps pin at `u128::MAX`.
fn scale(nanos: u128, multiplier: f64) -> u128 {
    (nanos as f64 * multiplier).round() as u128
}

/// Builder for [`TruncatedExponential`].
#[derive(Debug)]
pub struct TruncatedExponentialBuilder {
    start: Duration,
    step: Duration,
    multiplier: f64,
    max: Duration,
}

impl Default for TruncatedExponentialBuilder {
    fn default() -> Self {
        let defaults = TruncatedExponential::default();
        Self {
            start: defaults.start,
            step: defaults.step,
            multiplier: defaults.multiplier,
            max: defaults.max,
        }
    }
}

impl TruncatedExponentialBuilder {
    /// Sets the first delay.
    pub fn start(mut self, start: Duration) -> Self {
        self.start = start;
        self
    }

    /// Sets the initial growth step.
    pub fn step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Sets the step multiplier.
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Sets the ceiling.
    pub fn max(mut self, max: Duration) -> Self {
        self.max = max;
        self
    }

    /// Validates the parameters and builds the strategy.
    pub fn build(self) -> Result<TruncatedExponential, BackoffError> {
        if self.start.is_zero() {
            return Err(BackoffError::ZeroStart);
        }
        if self.step.is_zero() {
            return Err(BackoffError::ZeroStep);
        }
        if !self.multiplier.is_finite() || self.multiplier <= 1.0 {
            return Err(BackoffError::InvalidMultiplier {
                multiplier: self.multiplier,
            });
        }
        if self.max.is_zero() {
            return Err(BackoffError::ZeroMax);
        }
        Ok(TruncatedExponential {
            start: self.start,
            step: self.step,
            multiplier: self.multiplier,
            max: self.max,
        })
    }
}

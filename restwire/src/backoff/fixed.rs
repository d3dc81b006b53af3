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

//! Fixed delay backoff.

use crate::backoff::{BackoffMark, BackoffStrategy};
use std::time::Duration;

/// Retries a bounded number of times with the same delay between attempts.
///
/// # Examples
///
/// ```rust
/// use restwire::backoff::{BackoffStrategy, FixedDelay};
/// use std::time::Duration;
///
/// let strategy = FixedDelay::new(Duration::from_millis(10), 2);
/// let mut mark = strategy.new_mark();
/// assert_eq!(mark.next_retry_time(), Some(Duration::from_millis(10)));
/// assert_eq!(mark.next_retry_time(), Some(Duration::from_millis(10)));
/// assert_eq!(mark.next_retry_time(), None);
/// ```
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
    max_retries: u32,
}

impl FixedDelay {
    /// Creates a strategy retrying `max_retries` times, `delay` apart.
    pub fn new(delay: Duration, max_retries: u32) -> Self {
        Self { delay, max_retries }
    }

    /// The delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl BackoffStrategy for FixedDelay {
    fn new_mark(&self) -> Box<dyn BackoffMark> {
        Box::new(FixedMark {
            delay: self.delay,
            remaining: self.max_retries,
        })
    }

    fn name(&self) -> &str {
        "FixedDelay"
    }
}

#[derive(Debug)]
struct FixedMark {
    delay: Duration,
    remaining: u32,
}

impl BackoffMark for FixedMark {
    fn next_retry_time(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_retries() {
        let strategy = FixedDelay::new(Duration::from_secs(1), 0);
        assert_eq!(strategy.new_mark().next_retry_time(), None);
        assert_eq!(strategy.name(), "FixedDelay");
    }

    #[test]
    fn test_each_mark_gets_full_budget() {
        let strategy = FixedDelay::new(Duration::from_millis(5), 1);
        let mut first = strategy.new_mark();
        assert!(first.next_retry_time().is_some());
        assert!(first.next_retry_time().is_none());

        let mut second = strategy.new_mark();
        assert_eq!(second.next_retry_time(), Some(Duration::from_millis(5)));
    }
}

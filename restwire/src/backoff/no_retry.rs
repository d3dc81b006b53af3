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

//! Backoff that never retries.

use crate::backoff::{BackoffMark, BackoffStrategy};
use std::time::Duration;

/// A strategy whose marks always stop immediately.
///
/// Use this when the caller handles failures itself or when the remote
/// operation is not safe to repeat.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl NoRetry {
    /// Creates a new no-retry strategy.
    pub fn new() -> Self {
        Self
    }
}

impl BackoffStrategy for NoRetry {
    fn new_mark(&self) -> Box<dyn BackoffMark> {
        Box::new(NoRetry)
    }

    fn name(&self) -> &str {
        "NoRetry"
    }
}

impl BackoffMark for NoRetry {
    fn next_retry_time(&mut self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_retries() {
        let strategy = NoRetry::new();
        let mut mark = strategy.new_mark();
        for _ in 0..5 {
            assert_eq!(mark.next_retry_time(), None);
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(NoRetry::default().name(), "NoRetry");
    }
}

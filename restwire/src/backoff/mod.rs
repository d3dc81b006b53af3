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

//! Retry backoff strategies for client calls.
//!
//! A client proxy consults its [`BackoffStrategy`] whenever a call fails with
//! a recoverable transport error. Application errors and HTTP error
//! statuses are never retried.
//!
//! # Available Strategies
//!
//! - **[`TruncatedExponential`]**: growing delays, stops past a ceiling
//! - **[`FixedDelay`]**: a fixed number of retries with a constant delay
//! - **[`NoRetry`]**: fail on the first error
//!
//! # Examples
//!
//! ```rust
//! use restwire::backoff::{BackoffStrategy, TruncatedExponential};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), restwire::backoff::BackoffError> {
//! let strategy = TruncatedExponential::builder()
//!     .start(Duration::from_millis(100))
//!     .max(Duration::from_secs(2))
//!     .build()?;
//!
//! let mut mark = strategy.new_mark();
//! while let Some(delay) = mark.next_retry_time() {
//!     assert!(delay <= Duration::from_secs(2));
//! }
//! # Ok(())
//! # }
//! ```

mod exponential;
mod fixed;
mod no_retry;
mod traits;

pub use self::exponential::{TruncatedExponential, TruncatedExponentialBuilder};
pub use self::fixed::FixedDelay;
pub use self::no_retry::NoRetry;
pub use self::traits::{BackoffError, BackoffMark, BackoffStrategy};

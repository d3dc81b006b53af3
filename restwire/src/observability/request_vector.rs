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

//! Hierarchical request identifiers.
//!
//! A request vector names one call in a tree of calls. The first service to
//! see a request picks a root; every outgoing call appends one hex encoded
//! counter value, so `4f1c.2.a` is the tenth call made while handling the
//! second call made while handling request `4f1c`.
//!
//! # Examples
//!
//! ```rust
//! use restwire::observability::RequestVector;
//!
//! let vector: RequestVector = "4f1c.2.a".parse().unwrap();
//! assert_eq!(vector.root(), "4f1c");
//! assert_eq!(vector.suffixes(), &[2, 10]);
//! assert_eq!(vector.child(11).to_string(), "4f1c.2.a.b");
//!
//! assert!("4f1c..2".parse::<RequestVector>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Header carrying the request vector between services.
pub const REQUEST_VECTOR_HEADER: &str = "x-request-vector";

const SEPARATOR: char = '.';

/// Errors raised when building or parsing a request vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestVectorError {
    /// The input was empty.
    #[error("request vector is empty")]
    Empty,

    /// The root segment was empty, as in `.1.2`.
    #[error("request vector `{input}` has an empty root")]
    EmptyRoot {
        /// The rejected input
        input: String,
    },

    /// A suffix segment was empty, as in `a..1` or `a.1.`.
    #[error("request vector `{input}` has an empty segment")]
    EmptySegment {
        /// The rejected input
        input: String,
    },

    /// The root contains the separator or a character not allowed in a header.
    #[error("invalid request vector root `{root}`")]
    InvalidRoot {
        /// The rejected root
        root: String,
    },

    /// A suffix is not a hex encoded `u64`.
    #[error("invalid request vector segment `{segment}`")]
    InvalidSuffix {
        /// The rejected segment
        segment: String,
    },
}

/// A root identifier followed by the chain of per-hop counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestVector {
    root: String,
    suffixes: Vec<u64>,
}

impl RequestVector {
    /// Creates a vector with the given root and no suffixes.
    pub fn new(root: impl Into<String>) -> Result<Self, RequestVectorError> {
        let root = root.into();
        validate_root(&root)?;
        Ok(Self {
            root,
            suffixes: Vec::new(),
        })
    }

    /// Creates a vector with a random root.
    pub fn new_root() -> Self {
        Self {
            root: uuid::Uuid::new_v4().simple().to_string(),
            suffixes: Vec::new(),
        }
    }

    /// Creates a vector from its parts.
    pub fn from_parts(
        root: impl Into<String>,
        suffixes: impl Into<Vec<u64>>,
    ) -> Result<Self, RequestVectorError> {
        let mut vector = Self::new(root)?;
        vector.suffixes = suffixes.into();
        Ok(vector)
    }

    /// Renders a root and suffix chain in wire form.
    pub fn build(root: &str, suffixes: &[u64]) -> Result<String, RequestVectorError> {
        Ok(Self::from_parts(root, suffixes)?.to_string())
    }

    /// Parses the wire form.
    pub fn parse(input: &str) -> Result<Self, RequestVectorError> {
        if input.is_empty() {
            return Err(RequestVectorError::Empty);
        }
        let mut segments = input.split(SEPARATOR);
        let root = segments.next().unwrap_or_default();
        if root.is_empty() {
            return Err(RequestVectorError::EmptyRoot {
                input: input.to_string(),
            });
        }
        validate_root(root)?;

        let mut suffixes = Vec::new();
        for segment in segments {
            if segment.is_empty() {
                return Err(RequestVectorError::EmptySegment {
                    input: input.to_string(),
                });
            }
            suffixes.push(parse_suffix(segment)?);
        }
        Ok(Self {
            root: root.to_string(),
            suffixes,
        })
    }

    /// The root identifier.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The per-hop counters, outermost first.
    pub fn suffixes(&self) -> &[u64] {
        &self.suffixes
    }

    /// Number of hops below the root.
    pub fn depth(&self) -> usize {
        self.suffixes.len()
    }

    /// The vector for a call made from this one.
    pub fn child(&self, counter: u64) -> Self {
        let mut suffixes = Vec::with_capacity(self.suffixes.len() + 1);
        suffixes.extend_from_slice(&self.suffixes);
        suffixes.push(counter);
        Self {
            root: self.root.clone(),
            suffixes,
        }
    }

    /// The vector this one was derived from, if any.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.suffixes.split_last()?;
        Some(Self {
            root: self.root.clone(),
            suffixes: rest.to_vec(),
        })
    }
}

impl fmt::Display for RequestVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for suffix in &self.suffixes {
            write!(f, "{}{:x}", SEPARATOR, suffix)?;
        }
        Ok(())
    }
}

impl FromStr for RequestVector {
    type Err = RequestVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Hands out child vectors numbered by a process-wide counter.
#[derive(Debug)]
pub struct RequestVectorSource {
    counter: AtomicU64,
}

impl RequestVectorSource {
    /// Creates a source whose first child is numbered `1`.
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    /// Derives the next child of `parent`.
    pub fn next_child(&self, parent: &RequestVector) -> RequestVector {
        parent.child(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for RequestVectorSource {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_root(root: &str) -> Result<(), RequestVectorError> {
    if root.is_empty() {
        return Err(RequestVectorError::EmptyRoot {
            input: root.to_string(),
        });
    }
    if root.contains(SEPARATOR) || !root.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(RequestVectorError::InvalidRoot {
            root: root.to_string(),
        });
    }
    Ok(())
}

fn parse_suffix(segment: &str) -> Result<u64, RequestVectorError> {
    let invalid = || RequestVectorError::InvalidSuffix {
        segment: segment.to_string(),
    };
    if !segment.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u64::from_str_radix(segment, 16).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let cases: &[(&str, &[u64])] = &[
            ("root", &[]),
            ("root", &[0]),
            ("abc-123", &[1, 2, 3]),
            ("x", &[u64::MAX, 0, 255]),
        ];
        for (root, suffixes) in cases {
            let wire = RequestVector::build(root, suffixes).unwrap();
            let parsed = RequestVector::parse(&wire).unwrap();
            assert_eq!(parsed.root(), *root);
            assert_eq!(parsed.suffixes(), *suffixes);
        }
    }

    #[test]
    fn test_malformed_inputs() {
        assert_eq!(RequestVector::parse(""), Err(RequestVectorError::Empty));
        assert!(matches!(
            RequestVector::parse(".1"),
            Err(RequestVectorError::EmptyRoot { .. })
        ));
        assert!(matches!(
            RequestVector::parse("root.1."),
            Err(RequestVectorError::EmptySegment { .. })
        ));
        assert!(matches!(
            RequestVector::parse("root..1"),
            Err(RequestVectorError::EmptySegment { .. })
        ));
        assert!(matches!(
            RequestVector::parse("root.xyz"),
            Err(RequestVectorError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            RequestVector::parse("root.+1"),
            Err(RequestVectorError::InvalidSuffix { .. })
        ));
        assert!(matches!(
            RequestVector::parse("root.10000000000000000"),
            Err(RequestVectorError::InvalidSuffix { .. })
        ));
    }

    #[test]
    fn test_build_rejects_bad_roots() {
        assert!(RequestVector::build("", &[1]).is_err());
        assert!(RequestVector::build("a.b", &[1]).is_err());
        assert!(RequestVector::build("a b", &[]).is_err());
    }

    #[test]
    fn test_child_and_parent() {
        let root = RequestVector::new("r").unwrap();
        let child = root.child(26);
        assert_eq!(child.to_string(), "r.1a");
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent(), Some(root.clone()));
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_source_is_monotonic() {
        let source = RequestVectorSource::new();
        let parent = RequestVector::new("p").unwrap();
        let first = source.next_child(&parent);
        let second = source.next_child(&parent);
        assert_eq!(first.suffixes(), &[1]);
        assert_eq!(second.suffixes(), &[2]);
    }

    #[test]
    fn test_new_root_is_valid() {
        let vector = RequestVector::new_root();
        assert_eq!(vector.root().len(), 32);
        assert_eq!(RequestVector::parse(&vector.to_string()).unwrap(), vector);
    }
}

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

//! Media type parsing and matching.
//!
//! A [`MediaType`] is the `type/subtype; key=value` form carried by the
//! `Content-Type` and `Accept` headers. Type and subtype are compared
//! case-insensitively and either may be the `*` wildcard.

use crate::codec::MediaError;
use std::fmt;
use std::str::FromStr;

const WILDCARD: &str = "*";

/// A parsed media type such as `application/json; charset=utf-8`.
///
/// # Examples
///
/// ```rust
/// use restwire::codec::MediaType;
///
/// let json: MediaType = "application/json; charset=utf-8".parse().unwrap();
/// assert_eq!(json.essence(), "application/json");
/// assert_eq!(json.param("charset"), Some("utf-8"));
/// assert!(json.matches(&"application/*".parse().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    main: String,
    sub: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// Creates a media type without parameters.
    pub fn new(main: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            main: main.into().to_ascii_lowercase(),
            sub: sub.into().to_ascii_lowercase(),
            params: Vec::new(),
        }
    }

    /// `application/json`
    pub fn application_json() -> Self {
        Self::new("application", "json")
    }

    /// `text/plain`
    pub fn text_plain() -> Self {
        Self::new("text", "plain")
    }

    /// `*/*`
    pub fn any() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    /// Adds a parameter, replacing an existing one with the same name.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        self.params.retain(|(key, _)| *key != name);
        self.params.push((name, value.into()));
        self
    }

    /// Parses a single media type.
    pub fn parse(value: &str) -> Result<Self, MediaError> {
        let invalid = || MediaError::InvalidMediaType {
            value: value.to_string(),
        };

        let mut parts = value.split(';');
        let essence = parts.next().unwrap_or_default().trim();
        let (main, sub) = essence.split_once('/').ok_or_else(invalid)?;
        if !is_token(main) || !is_token(sub) || (main == WILDCARD && sub != WILDCARD) {
            return Err(invalid());
        }

        let mut media = Self::new(main, sub);
        for param in parts {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let (key, val) = param.split_once('=').ok_or_else(invalid)?;
            let key = key.trim();
            if !is_token(key) {
                return Err(invalid());
            }
            let val = val.trim().trim_matches('"');
            media = media.with_param(key, val);
        }
        Ok(media)
    }

    /// The top level type, `application` in `application/json`.
    pub fn main_type(&self) -> &str {
        &self.main
    }

    /// The subtype, `json` in `application/json`.
    pub fn sub_type(&self) -> &str {
        &self.sub
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.main, self.sub)
    }

    /// Looks up a parameter by case-insensitive name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if either the type or the subtype is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.main == WILDCARD || self.sub == WILDCARD
    }

    /// The `q` parameter, defaulting to `1.0` when absent or malformed.
    pub fn quality(&self) -> f32 {
        self.param("q")
            .and_then(|q| q.parse::<f32>().ok())
            .filter(|q| (0.0..=1.0).contains(q))
            .unwrap_or(1.0)
    }

    /// Returns `true` if the two media types are compatible.
    ///
    /// Wildcards on either side match anything in that position.
    /// Parameters are ignored.
    pub fn matches(&self, other: &MediaType) -> bool {
        let main = self.main == WILDCARD || other.main == WILDCARD || self.main == other.main;
        let sub = self.sub == WILDCARD || other.sub == WILDCARD || self.sub == other.sub;
        main && sub
    }

    /// Returns a copy without parameters.
    pub fn without_params(&self) -> Self {
        Self::new(self.main.clone(), self.sub.clone())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main, self.sub)?;
        for (key, value) in &self.params {
            write!(f, "; {}={}", key, value)?;
        }
        Ok(())
    }
}

impl FromStr for MediaType {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses an `Accept` header into media types ordered by preference.
///
/// Entries that fail to parse or carry `q=0` are dropped. Entries with equal
/// quality keep their header order. An empty header accepts anything.
pub fn parse_accept(header: &str) -> Vec<MediaType> {
    let mut accepted: Vec<MediaType> = header
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| MediaType::parse(entry).ok())
        .filter(|media| media.quality() > 0.0)
        .collect();
    if accepted.is_empty() && header.trim().is_empty() {
        accepted.push(MediaType::any());
    }
    accepted.sort_by(|a, b| b.quality().total_cmp(&a.quality()));
    accepted
}

fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+*".contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_params() {
        let media = MediaType::parse("Application/JSON; Charset=\"UTF-8\"").unwrap();
        assert_eq!(media.main_type(), "application");
        assert_eq!(media.sub_type(), "json");
        assert_eq!(media.param("charset"), Some("UTF-8"));
        assert_eq!(media.to_string(), "application/json; charset=UTF-8");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(MediaType::parse("json").is_err());
        assert!(MediaType::parse("/json").is_err());
        assert!(MediaType::parse("application/").is_err());
        assert!(MediaType::parse("*/json").is_err());
        assert!(MediaType::parse("text/plain; charset").is_err());
    }

    #[test]
    fn test_wildcard_matching() {
        let json = MediaType::application_json();
        assert!(json.matches(&MediaType::any()));
        assert!(json.matches(&MediaType::parse("application/*").unwrap()));
        assert!(!json.matches(&MediaType::text_plain()));
        assert!(MediaType::parse("text/*").unwrap().matches(&MediaType::text_plain()));
    }

    #[test]
    fn test_parse_accept_orders_by_quality() {
        let accepted = parse_accept("text/plain;q=0.5, application/json, */*;q=0.1");
        let essences: Vec<_> = accepted.iter().map(MediaType::essence).collect();
        assert_eq!(essences, vec!["application/json", "text/plain", "*/*"]);
    }

    #[test]
    fn test_parse_accept_drops_refused_and_invalid() {
        let accepted = parse_accept("text/plain;q=0, garbage, application/json");
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0], MediaType::application_json());
    }

    #[test]
    fn test_parse_accept_empty_is_any() {
        assert_eq!(parse_accept(""), vec![MediaType::any()]);
    }
}

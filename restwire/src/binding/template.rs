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

//! URI templates.
//!
//! A [`UriTemplate`] is a path with `{name}` placeholders plus a list of
//! query parameters, each filled from a placeholder of its own. Query
//! placeholders that would collide with an existing placeholder are
//! renamed by appending the first unused numeric suffix.
//!
//! # Examples
//!
//! ```rust
//! use restwire::binding::{BaseUri, UriTemplate};
//! use std::collections::HashMap;
//!
//! let mut template = UriTemplate::parse("/items/{id}").unwrap();
//! let placeholder = template.add_query_parameter("id");
//! assert_eq!(placeholder, "id1");
//! assert_eq!(template.to_string(), "/items/{id}?id={id1}");
//!
//! let base = BaseUri::parse("http://host/api").unwrap();
//! let mut values = HashMap::new();
//! values.insert("id", vec!["a/b".to_string()]);
//! values.insert("id1", vec!["7".to_string()]);
//! let url = template.expand(&base, &values).unwrap();
//! assert_eq!(url.as_str(), "http://host/api/items/a%2Fb?id=7");
//! ```

use crate::binding::{ArgumentError, BindingError};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// An absolute, hierarchical URI that templates are expanded against.
///
/// Parsing happens once at bind time, so a malformed base URI is reported
/// before any call is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUri(Url);

impl BaseUri {
    /// Parses and validates a base URI.
    pub fn parse(uri: &str) -> Result<Self, BindingError> {
        let malformed = |reason: String| BindingError::MalformedBaseUri {
            uri: uri.to_string(),
            reason,
        };
        let url = Url::parse(uri).map_err(|e| malformed(e.to_string()))?;
        if url.cannot_be_a_base() {
            return Err(malformed("uri cannot carry a path".to_string()));
        }
        if url.fragment().is_some() {
            return Err(malformed("uri must not carry a fragment".to_string()));
        }
        Ok(Self(url))
    }

    /// The parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for BaseUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryBinding {
    key: String,
    placeholder: String,
}

/// A path template with query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    segments: Vec<Vec<Piece>>,
    trailing_slash: bool,
    query: Vec<QueryBinding>,
}

impl UriTemplate {
    /// Parses a path template.
    ///
    /// The template may not contain a query string or fragment; query
    /// parameters are added with [`add_query_parameter`](Self::add_query_parameter).
    pub fn parse(template: &str) -> Result<Self, BindingError> {
        let invalid = |reason: &str| BindingError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };
        if template.contains(['?', '#']) {
            return Err(invalid("query and fragment must be declared as parameters"));
        }

        let mut segments = Vec::new();
        for raw in template.split('/').filter(|s| !s.is_empty()) {
            segments.push(parse_segment(raw).map_err(invalid)?);
        }

        Ok(Self {
            segments,
            trailing_slash: template.ends_with('/'),
            query: Vec::new(),
        })
    }

    /// Placeholder names used in the path, in order of first appearance.
    pub fn path_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for piece in self.segments.iter().flatten() {
            if let Piece::Variable(name) = piece {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Returns `true` if the path uses the placeholder.
    pub fn has_path_variable(&self, name: &str) -> bool {
        self.segments
            .iter()
            .flatten()
            .any(|piece| matches!(piece, Piece::Variable(v) if v == name))
    }

    /// Appends a query parameter and returns the placeholder that fills it.
    ///
    /// The placeholder is `key` unless that name is already taken by a path
    /// variable or an earlier query parameter, in which case it is `key1`,
    /// `key2` and so on, whichever is free first.
    pub fn add_query_parameter(&mut self, key: &str) -> String {
        let mut placeholder = key.to_string();
        let mut suffix = 0u32;
        while self.is_placeholder(&placeholder) {
            suffix += 1;
            placeholder = format!("{}{}", key, suffix);
        }
        self.query.push(QueryBinding {
            key: key.to_string(),
            placeholder: placeholder.clone(),
        });
        placeholder
    }

    /// Returns `true` if the template has no placeholders at all.
    pub fn is_fixed(&self) -> bool {
        self.query.is_empty() && self.path_variables().is_empty()
    }

    /// Expands the template against `base`.
    ///
    /// `values` maps placeholders to their rendered values. A path
    /// placeholder must have a value; a query placeholder without values is
    /// left out, and one with several values repeats its key.
    pub fn expand(
        &self,
        base: &BaseUri,
        values: &HashMap<&str, Vec<String>>,
    ) -> Result<Url, ArgumentError> {
        let mut rendered = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            let mut text = String::new();
            let mut variable = None;
            for piece in segment {
                match piece {
                    Piece::Literal(literal) => text.push_str(literal),
                    Piece::Variable(name) => {
                        let value = values
                            .get(name.as_str())
                            .and_then(|v| v.first())
                            .ok_or_else(|| ArgumentError::MissingPathVariable {
                                name: name.clone(),
                            })?;
                        text.push_str(value);
                        variable = Some(name);
                    }
                }
            }
            // Empty and dot segments would address a different resource.
            if let Some(name) = variable {
                if matches!(text.as_str(), "" | "." | "..") {
                    return Err(ArgumentError::InvalidArgument {
                        name: name.clone(),
                        reason: format!("`{}` is not a valid path segment", text),
                    });
                }
            }
            rendered.push(text);
        }

        let mut url = base.as_url().clone();
        if !rendered.is_empty() || self.trailing_slash {
            // BaseUri rejects cannot-be-a-base URLs, so this always succeeds.
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty();
                path.extend(rendered.iter());
                if self.trailing_slash {
                    path.push("");
                }
            }
        }

        let pairs: Vec<(&str, &str)> = self
            .query
            .iter()
            .flat_map(|binding| {
                values
                    .get(binding.placeholder.as_str())
                    .into_iter()
                    .flatten()
                    .map(move |value| (binding.key.as_str(), value.as_str()))
            })
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn is_placeholder(&self, name: &str) -> bool {
        self.has_path_variable(name) || self.query.iter().any(|q| q.placeholder == name)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str("/")?;
            for piece in segment {
                match piece {
                    Piece::Literal(literal) => f.write_str(literal)?,
                    Piece::Variable(name) => write!(f, "{{{}}}", name)?,
                }
            }
        }
        if self.trailing_slash {
            f.write_str("/")?;
        }
        for (i, binding) in self.query.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={{{}}}", separator, binding.key, binding.placeholder)?;
        }
        Ok(())
    }
}

fn parse_segment(raw: &str) -> Result<Vec<Piece>, &'static str> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => return Err("nested `{` in placeholder"),
                        Some(c) => name.push(c),
                        None => return Err("unclosed `{`"),
                    }
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err("empty placeholder");
                }
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Variable(name.to_string()));
            }
            '}' => return Err("unmatched `}`"),
            c => literal.push(c),
        }
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}

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

//! Method binding descriptors.
//!
//! A [`MethodBindingDescriptor`] is the validated, compiled form of a
//! [`RouteDecl`]: the verb to send, a [`UriExtractor`] that renders the
//! target URI from positional arguments, and a [`BodyExtractor`] that picks
//! the body argument.

use crate::binding::{
    ArgumentError, BaseUri, BindingError, ParamRole, RouteDecl, UriTemplate,
};
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathParam {
    position: usize,
    name: String,
    variable: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryParam {
    position: usize,
    name: String,
    placeholder: String,
}

/// Renders the target URI of a call from its arguments.
#[derive(Debug, Clone)]
pub struct UriExtractor {
    base: BaseUri,
    template: UriTemplate,
    path_params: Vec<PathParam>,
    query_params: Vec<QueryParam>,
    cached: Option<Url>,
}

impl UriExtractor {
    /// The template, with query placeholders resolved.
    pub fn template(&self) -> &UriTemplate {
        &self.template
    }

    /// Returns `true` if the URI does not depend on the arguments and is
    /// computed once.
    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Renders the URI for one call.
    pub fn extract(&self, args: &[Value]) -> Result<Url, ArgumentError> {
        if let Some(url) = &self.cached {
            return Ok(url.clone());
        }

        let mut values: HashMap<&str, Vec<String>> = HashMap::new();
        for param in &self.path_params {
            let text = argument(args, param.position)
                .map(|value| scalar_text(&param.name, value))
                .transpose()?
                .flatten()
                .ok_or_else(|| ArgumentError::MissingPathVariable {
                    name: param.variable.clone(),
                })?;
            values.insert(param.variable.as_str(), vec![text]);
        }
        for param in &self.query_params {
            let texts = match argument(args, param.position) {
                Some(value) => query_texts(&param.name, value)?,
                None => Vec::new(),
            };
            values.insert(param.placeholder.as_str(), texts);
        }
        self.template.expand(&self.base, &values)
    }
}

/// Picks the body argument of a call, if the method has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyExtractor {
    position: Option<usize>,
}

impl BodyExtractor {
    /// Position of the body parameter.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// The body argument. `None` if the method has no body parameter or
    /// the argument is `null`.
    pub fn extract<'a>(&self, args: &'a [Value]) -> Option<&'a Value> {
        self.position
            .and_then(|position| args.get(position))
            .filter(|value| !value.is_null())
    }
}

/// The compiled binding of one interface method.
///
/// # Examples
///
/// ```rust
/// use restwire::binding::{BaseUri, MethodBindingDescriptor, ParamDecl, RouteDecl};
/// use http::Method;
/// use serde_json::json;
///
/// let base = BaseUri::parse("http://host/api").unwrap();
/// let route = RouteDecl::new("get_profile")
///     .verb(Method::GET)
///     .path("/profile/{id}")
///     .param(ParamDecl::path("id", "id"));
///
/// let descriptor = MethodBindingDescriptor::bind(&base, &route).unwrap();
/// let args = [json!(7)];
/// let (url, body) = descriptor.resolve(&args).unwrap();
/// assert_eq!(url.as_str(), "http://host/api/profile/7");
/// assert!(body.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MethodBindingDescriptor {
    method: String,
    verb: Method,
    arity: usize,
    uri: UriExtractor,
    body: BodyExtractor,
}

impl MethodBindingDescriptor {
    /// Validates a route declaration and compiles it against `base`.
    ///
    /// Without a declared verb the method is bound to `GET`; without a
    /// declared path it targets the base URI itself.
    pub fn bind(base: &BaseUri, decl: &RouteDecl) -> Result<Self, BindingError> {
        let method = decl.method.as_str();

        if let Some(qualifier) = decl.qualifiers.first() {
            return Err(BindingError::UnsupportedQualifier {
                method: method.to_string(),
                qualifier: qualifier.to_string(),
            });
        }

        let verb = match decl.verbs.as_slice() {
            [] => Method::GET,
            [verb] => verb.clone(),
            verbs => {
                return Err(BindingError::AmbiguousVerb {
                    method: method.to_string(),
                    verbs: verbs.iter().map(ToString::to_string).collect(),
                });
            }
        };

        let path = match decl.paths.as_slice() {
            [] => "",
            [path] => path.as_str(),
            paths => {
                return Err(BindingError::AmbiguousPath {
                    method: method.to_string(),
                    paths: paths.to_vec(),
                });
            }
        };
        let mut template = UriTemplate::parse(path)?;

        let mut path_params = Vec::new();
        let mut query_keys = Vec::new();
        let mut body_position = None;
        for (position, param) in decl.params.iter().enumerate() {
            let role = match param.roles.as_slice() {
                [] => {
                    return Err(BindingError::UnrecognizedParameter {
                        method: method.to_string(),
                        parameter: param.name.clone(),
                    });
                }
                [role] => role,
                _ => {
                    return Err(BindingError::ConflictingParameterRoles {
                        method: method.to_string(),
                        parameter: param.name.clone(),
                    });
                }
            };
            match role {
                ParamRole::PathVariable(variable) => {
                    if !template.has_path_variable(variable) {
                        return Err(BindingError::UnknownPathVariable {
                            method: method.to_string(),
                            variable: variable.clone(),
                        });
                    }
                    path_params.push(PathParam {
                        position,
                        name: param.name.clone(),
                        variable: variable.clone(),
                    });
                }
                ParamRole::QueryParam(key) => query_keys.push((position, param, key)),
                ParamRole::Body => {
                    if body_position.is_some() {
                        return Err(BindingError::DuplicateBody {
                            method: method.to_string(),
                        });
                    }
                    body_position = Some(position);
                }
            }
        }

        if let Some(unbound) = template
            .path_variables()
            .into_iter()
            .find(|variable| !path_params.iter().any(|p| p.variable == *variable))
        {
            return Err(BindingError::UnboundPathVariable {
                method: method.to_string(),
                variable: unbound.to_string(),
            });
        }

        let query_params: Vec<QueryParam> = query_keys
            .into_iter()
            .map(|(position, param, key)| QueryParam {
                position,
                name: param.name.clone(),
                placeholder: template.add_query_parameter(key),
            })
            .collect();

        let cached = if path_params.is_empty() && query_params.is_empty() {
            let url = template.expand(base, &HashMap::new()).map_err(|e| {
                BindingError::InvalidTemplate {
                    template: path.to_string(),
                    reason: e.to_string(),
                }
            })?;
            Some(url)
        } else {
            None
        };

        Ok(Self {
            method: method.to_string(),
            verb,
            arity: decl.params.len(),
            uri: UriExtractor {
                base: base.clone(),
                template,
                path_params,
                query_params,
                cached,
            },
            body: BodyExtractor {
                position: body_position,
            },
        })
    }

    /// The interface method name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The HTTP verb.
    pub fn verb(&self) -> &Method {
        &self.verb
    }

    /// Number of positional arguments a call must supply.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The URI extractor.
    pub fn uri(&self) -> &UriExtractor {
        &self.uri
    }

    /// The body extractor.
    pub fn body(&self) -> &BodyExtractor {
        &self.body
    }

    /// Renders the URI and picks the body for one call.
    pub fn resolve<'a>(
        &self,
        args: &'a [Value],
    ) -> Result<(Url, Option<&'a Value>), ArgumentError> {
        if args.len() != self.arity {
            return Err(ArgumentError::ArityMismatch {
                method: self.method.clone(),
                expected: self.arity,
                actual: args.len(),
            });
        }
        Ok((self.uri.extract(args)?, self.body.extract(args)))
    }
}

fn argument(args: &[Value], position: usize) -> Option<&Value> {
    args.get(position).filter(|value| !value.is_null())
}

fn scalar_text(name: &str, value: &Value) -> Result<Option<String>, ArgumentError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) => Err(ArgumentError::InvalidArgument {
            name: name.to_string(),
            reason: "sequences are only allowed in query parameters".to_string(),
        }),
        Value::Object(_) => Err(ArgumentError::InvalidArgument {
            name: name.to_string(),
            reason: "structured values have no uri form".to_string(),
        }),
    }
}

fn query_texts(name: &str, value: &Value) -> Result<Vec<String>, ArgumentError> {
    match value {
        Value::Array(items) => {
            let mut texts = Vec::with_capacity(items.len());
            for item in items {
                if item.is_array() {
                    return Err(ArgumentError::InvalidArgument {
                        name: name.to_string(),
                        reason: "nested sequences have no uri form".to_string(),
                    });
                }
                texts.extend(scalar_text(name, item)?);
            }
            Ok(texts)
        }
        other => Ok(scalar_text(name, other)?.into_iter().collect()),
    }
}

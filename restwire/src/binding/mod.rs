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

//! Route binding for RESTWire clients.
//!
//! This module turns declared routes into compiled per-method descriptors.
//!
//! # Overview
//!
//! - **[`RouteDecl`]**: what a method's annotations say, unvalidated
//! - **[`MethodBindingDescriptor`]**: the validated binding of one method
//! - **[`UriTemplate`]**: `{name}` placeholders, query disambiguation
//! - **[`RouteTable`]**: every descriptor of one interface
//!
//! All validation happens when a table is bound. A call only renders
//! arguments into an already validated template, so the only per-call
//! failures are [`ArgumentError`]s.
//!
//! # Parameter Roles
//!
//! Each parameter must carry exactly one [`ParamRole`]:
//!
//! | Role | Effect |
//! |------|--------|
//! | `PathVariable(name)` | fills `{name}` in the path, percent-encoded |
//! | `QueryParam(key)` | appended as `key=value`, omitted when `null`, repeated for sequences |
//! | `Body` | encoded as the request body, at most one per method |
//!
//! # Examples
//!
//! ```rust
//! use restwire::binding::{ParamDecl, RouteDecl, RouteTable};
//! use http::Method;
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let table = RouteTable::bind(
//!     "http://host/api",
//!     vec![RouteDecl::new("search")
//!         .verb(Method::GET)
//!         .path("/items")
//!         .param(ParamDecl::query("term", "q"))
//!         .param(ParamDecl::query("page", "page"))],
//! )?;
//!
//! let search = table.get("search").unwrap();
//! let (url, _) = search.resolve(&[json!("red shoes"), json!(null)])?;
//! assert_eq!(url.as_str(), "http://host/api/items?q=red+shoes");
//! # Ok(())
//! # }
//! ```

mod descriptor;
mod error;
mod route;
mod table;
mod template;

pub use self::descriptor::{BodyExtractor, MethodBindingDescriptor, UriExtractor};
pub use self::error::{ArgumentError, BindingError};
pub use self::route::{ParamDecl, ParamRole, RouteDecl, RouteQualifier};
pub use self::table::RouteTable;
pub use self::template::{BaseUri, UriTemplate};

//! Parsing logic for the `#[restwire::client]` and `#[restwire::rpc]` macros.
//!
//! Route annotations are collected verbatim. Whether a route is valid is
//! decided at runtime by the binding layer, so the macro never disagrees
//! with a hand-written route table.

use syn::{
    Attribute, Error, Expr, ExprLit, FnArg, GenericArgument, Ident, ItemTrait, Lit, LitStr, Meta,
    MetaNameValue, Pat, PatType, PathArguments, Result, ReturnType, TraitItem, TraitItemFn, Type,
    parse::Parser, punctuated::Punctuated, spanned::Spanned,
};

/// Method attributes naming an HTTP verb.
const VERB_ATTRIBUTES: &[(&str, &str)] = &[
    ("get", "GET"),
    ("post", "POST"),
    ("put", "PUT"),
    ("delete", "DELETE"),
    ("patch", "PATCH"),
    ("head", "HEAD"),
];

/// Verbs accepted by `#[route(method = "...")]`.
const KNOWN_VERBS: &[&str] = &[
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "TRACE", "CONNECT",
];

/// Arguments of the trait-level attribute.
#[derive(Debug, Default)]
pub struct InterfaceArgs {
    /// Interface name override
    pub name: Option<String>,
}

/// Parse `#[restwire::client(name = "...")]` style arguments.
pub fn parse_interface_args(attr_args: &[Meta]) -> Result<InterfaceArgs> {
    let mut args = InterfaceArgs::default();
    for meta in attr_args {
        match meta {
            Meta::NameValue(nv) if nv.path.is_ident("name") => {
                args.name = Some(string_value(&nv.value)?);
            }
            _ => {
                return Err(Error::new_spanned(meta, "Unknown attribute. Supported: name"));
            }
        }
    }
    Ok(args)
}

/// Parsed client interface.
#[derive(Debug)]
pub struct ClientDef {
    /// The trait with every routing attribute removed
    pub trait_def: ItemTrait,
    /// Interface name reported by the client
    pub interface: String,
    /// Client methods
    pub methods: Vec<ClientMethodDef>,
}

/// A verb and where it was written.
#[derive(Debug)]
pub struct VerbDef {
    /// Upper-case verb, one of [`KNOWN_VERBS`]
    pub name: String,
    /// Span of the attribute
    pub span: proc_macro2::Span,
}

/// Routing qualifiers the runtime rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualifierKind {
    Consumes,
    Produces,
    Headers,
    Params,
}

/// Parsed client method.
#[derive(Debug)]
pub struct ClientMethodDef {
    /// Method name
    pub name: Ident,
    /// Every declared verb
    pub verbs: Vec<VerbDef>,
    /// Every declared path
    pub paths: Vec<String>,
    /// Every declared qualifier
    pub qualifiers: Vec<(QualifierKind, String)>,
    /// Parameters, excluding the receiver
    pub params: Vec<ClientParamDef>,
    /// `T` of `Result<T, E>`
    pub output: Type,
    /// `E` of `Result<T, E>`
    pub error: Type,
}

/// Role of one client parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleDef {
    Path(String),
    Query(String),
    Body,
}

/// Parsed client parameter.
#[derive(Debug)]
pub struct ClientParamDef {
    pub name: Ident,
    pub ty: Type,
    pub roles: Vec<RoleDef>,
}

/// Parse a trait annotated with `#[restwire::client]`.
pub fn parse_client(trait_def: &ItemTrait, args: InterfaceArgs) -> Result<ClientDef> {
    let mut stripped = trait_def.clone();
    let mut methods = Vec::new();
    for item in &mut stripped.items {
        if let TraitItem::Fn(method) = item {
            methods.push(parse_client_method(method)?);
        }
    }
    Ok(ClientDef {
        interface: args.name.unwrap_or_else(|| trait_def.ident.to_string()),
        trait_def: stripped,
        methods,
    })
}

/// Parse one client method and strip its routing attributes.
fn parse_client_method(method: &mut TraitItemFn) -> Result<ClientMethodDef> {
    require_async_receiver(method)?;

    let mut verbs = Vec::new();
    let mut paths = Vec::new();
    let mut qualifiers = Vec::new();
    let mut kept = Vec::new();
    for attr in method.attrs.drain(..) {
        if let Some(verb) = verb_attribute(&attr) {
            verbs.push(VerbDef {
                name: verb.to_string(),
                span: attr.span(),
            });
            if let Meta::List(list) = &attr.meta {
                paths.push(list.parse_args::<LitStr>()?.value());
            }
        } else if attr.path().is_ident("route") {
            parse_route_attribute(&attr, &mut verbs, &mut paths, &mut qualifiers)?;
        } else {
            kept.push(attr);
        }
    }
    method.attrs = kept;

    let mut params = Vec::new();
    for arg in &mut method.sig.inputs {
        let FnArg::Typed(PatType { pat, ty, attrs, .. }) = arg else {
            continue;
        };
        let name = param_name(pat)?;
        let mut roles = Vec::new();
        let mut kept = Vec::new();
        for attr in attrs.drain(..) {
            if attr.path().is_ident("path") {
                roles.push(RoleDef::Path(optional_name(&attr, &name)?));
            } else if attr.path().is_ident("query") {
                roles.push(RoleDef::Query(optional_name(&attr, &name)?));
            } else if attr.path().is_ident("body") {
                attr.meta.require_path_only()?;
                roles.push(RoleDef::Body);
            } else {
                kept.push(attr);
            }
        }
        *attrs = kept;
        params.push(ClientParamDef {
            name,
            ty: (**ty).clone(),
            roles,
        });
    }

    let (output, error) = match result_types(&method.sig.output) {
        Some(types) => types,
        None => {
            return Err(Error::new_spanned(
                &method.sig,
                "Client methods must return Result<T, E> where E: From<ClientError>",
            ));
        }
    };

    Ok(ClientMethodDef {
        name: method.sig.ident.clone(),
        verbs,
        paths,
        qualifiers,
        params,
        output,
        error,
    })
}

/// Parse `#[route(method = "...", path = "...", consumes = "...", ...)]`.
fn parse_route_attribute(
    attr: &Attribute,
    verbs: &mut Vec<VerbDef>,
    paths: &mut Vec<String>,
    qualifiers: &mut Vec<(QualifierKind, String)>,
) -> Result<()> {
    let list = attr.meta.require_list()?;
    let parser = Punctuated::<MetaNameValue, syn::Token![,]>::parse_terminated;
    for arg in parser.parse2(list.tokens.clone())? {
        let value = string_value(&arg.value)?;
        let kind = if arg.path.is_ident("method") {
            let name = value.to_ascii_uppercase();
            if !KNOWN_VERBS.contains(&name.as_str()) {
                return Err(Error::new_spanned(
                    &arg.value,
                    format!("Unknown HTTP method '{}'", value),
                ));
            }
            verbs.push(VerbDef {
                name,
                span: arg.value.span(),
            });
            continue;
        } else if arg.path.is_ident("path") {
            paths.push(value);
            continue;
        } else if arg.path.is_ident("consumes") {
            QualifierKind::Consumes
        } else if arg.path.is_ident("produces") {
            QualifierKind::Produces
        } else if arg.path.is_ident("headers") {
            QualifierKind::Headers
        } else if arg.path.is_ident("params") {
            QualifierKind::Params
        } else {
            return Err(Error::new_spanned(
                &arg.path,
                "Unknown route key. Supported: method, path, consumes, produces, headers, params",
            ));
        };
        qualifiers.push((kind, value));
    }
    Ok(())
}

/// Parsed RPC interface.
#[derive(Debug)]
pub struct RpcDef {
    /// The trait with every `#[rpc(...)]` method attribute removed
    pub trait_def: ItemTrait,
    /// Interface name reported by the service
    pub interface: String,
    /// Service methods
    pub methods: Vec<RpcMethodDef>,
}

/// What an RPC method returns.
#[derive(Debug)]
pub enum RpcOutput {
    /// No return type
    Unit,
    /// A plain value that cannot fail
    Plain(Type),
    /// `Result<T, E>` where `E: Into<ServiceError>`
    Result(Type, Type),
}

/// Parsed RPC method.
#[derive(Debug)]
pub struct RpcMethodDef {
    /// Method name
    pub name: Ident,
    /// Name the dispatcher matches against
    pub wire_name: String,
    /// Parameters, excluding the receiver
    pub params: Vec<(Ident, Type)>,
    /// Return type
    pub output: RpcOutput,
}

/// Parse a trait annotated with `#[restwire::rpc]`.
pub fn parse_rpc(trait_def: &ItemTrait, args: InterfaceArgs) -> Result<RpcDef> {
    let mut stripped = trait_def.clone();
    let mut methods = Vec::new();
    for item in &mut stripped.items {
        if let TraitItem::Fn(method) = item {
            methods.push(parse_rpc_method(method)?);
        }
    }
    if methods.is_empty() {
        return Err(Error::new_spanned(
            trait_def,
            "RPC trait must have at least one method",
        ));
    }
    Ok(RpcDef {
        interface: args.name.unwrap_or_else(|| trait_def.ident.to_string()),
        trait_def: stripped,
        methods,
    })
}

fn parse_rpc_method(method: &mut TraitItemFn) -> Result<RpcMethodDef> {
    require_async_receiver(method)?;

    let mut wire_name = None;
    let mut kept = Vec::new();
    for attr in method.attrs.drain(..) {
        if attr.path().is_ident("rpc") {
            let nv: MetaNameValue = attr.parse_args()?;
            if !nv.path.is_ident("name") {
                return Err(Error::new_spanned(&nv.path, "Expected #[rpc(name = \"...\")]"));
            }
            wire_name = Some(string_value(&nv.value)?);
        } else {
            kept.push(attr);
        }
    }
    method.attrs = kept;

    let mut params = Vec::new();
    for arg in &method.sig.inputs {
        if let FnArg::Typed(PatType { pat, ty, .. }) = arg {
            params.push((param_name(pat)?, (**ty).clone()));
        }
    }

    let output = match &method.sig.output {
        ReturnType::Default => RpcOutput::Unit,
        ReturnType::Type(_, ty) => match result_types(&method.sig.output) {
            Some((ok, err)) => RpcOutput::Result(ok, err),
            None => RpcOutput::Plain((**ty).clone()),
        },
    };

    let name = method.sig.ident.clone();
    Ok(RpcMethodDef {
        wire_name: wire_name.unwrap_or_else(|| lower_camel_case(&name.to_string())),
        name,
        params,
        output,
    })
}

/// Returns the HTTP verb if `attr` is one of the verb shorthands.
fn verb_attribute(attr: &Attribute) -> Option<&'static str> {
    VERB_ATTRIBUTES
        .iter()
        .find(|(name, _)| attr.path().is_ident(name))
        .map(|(_, verb)| *verb)
}

fn require_async_receiver(method: &TraitItemFn) -> Result<()> {
    if method.sig.asyncness.is_none() {
        return Err(Error::new_spanned(&method.sig, "Methods must be async"));
    }
    match method.sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() => Ok(()),
        _ => Err(Error::new_spanned(
            &method.sig,
            "Methods must take &self as their first parameter",
        )),
    }
}

fn param_name(pat: &Pat) -> Result<Ident> {
    match pat {
        Pat::Ident(pat_ident) => Ok(pat_ident.ident.clone()),
        _ => Err(Error::new_spanned(
            pat,
            "Only simple parameter names are supported",
        )),
    }
}

/// `#[path]` defaults to the parameter name, `#[path("id")]` names it.
fn optional_name(attr: &Attribute, param: &Ident) -> Result<String> {
    match &attr.meta {
        Meta::Path(_) => Ok(param.to_string()),
        Meta::List(list) => Ok(list.parse_args::<LitStr>()?.value()),
        Meta::NameValue(_) => Err(Error::new_spanned(
            attr,
            "Expected #[path], #[path(\"name\")], #[query] or #[query(\"name\")]",
        )),
    }
}

fn string_value(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => Ok(lit_str.value()),
        _ => Err(Error::new_spanned(expr, "Expected a string literal")),
    }
}

/// Splits `Result<T, E>` into `T` and `E`.
fn result_types(output: &ReturnType) -> Option<(Type, Type)> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };
    let Type::Path(type_path) = &**ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty.clone()),
        _ => None,
    });
    let ok = types.next()?;
    let err = types.next()?;
    Some((ok, err))
}

/// Convert snake_case to lowerCamelCase.
pub fn lower_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split('_').filter(|w| !w.is_empty()).enumerate() {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_lower_camel_case() {
        assert_eq!(lower_camel_case("say_hello"), "sayHello");
        assert_eq!(lower_camel_case("get"), "get");
        assert_eq!(lower_camel_case("get_user_by_id"), "getUserById");
        assert_eq!(lower_camel_case("_private_name"), "privateName");
        assert_eq!(lower_camel_case("already"), "already");
    }

    #[test]
    fn test_parse_client_strips_attributes() {
        let item: ItemTrait = parse_quote! {
            trait Profiles {
                /// Fetch one.
                #[get("/profile/{id}")]
                async fn get_profile(&self, #[path] id: u64) -> Result<String, ClientError>;
            }
        };
        let def = parse_client(&item, InterfaceArgs::default()).unwrap();
        assert_eq!(def.interface, "Profiles");
        let method = &def.methods[0];
        assert_eq!(method.verbs[0].name, "GET");
        assert_eq!(method.paths, vec!["/profile/{id}".to_string()]);
        assert_eq!(method.params[0].roles, vec![RoleDef::Path("id".to_string())]);

        let TraitItem::Fn(stripped) = &def.trait_def.items[0] else {
            panic!("expected a method");
        };
        assert_eq!(stripped.attrs.len(), 1);
        let FnArg::Typed(param) = &stripped.sig.inputs[1] else {
            panic!("expected a typed parameter");
        };
        assert!(param.attrs.is_empty());
    }

    #[test]
    fn test_parse_route_attribute() {
        let item: ItemTrait = parse_quote! {
            trait Search {
                #[route(method = "put", path = "/items", consumes = "text/xml")]
                async fn put(&self, #[body] item: String, #[query("v")] version: u32)
                    -> Result<(), ClientError>;
            }
        };
        let def = parse_client(&item, InterfaceArgs::default()).unwrap();
        let method = &def.methods[0];
        assert_eq!(method.verbs[0].name, "PUT");
        assert_eq!(method.paths, vec!["/items".to_string()]);
        assert_eq!(
            method.qualifiers,
            vec![(QualifierKind::Consumes, "text/xml".to_string())]
        );
        assert_eq!(method.params[0].roles, vec![RoleDef::Body]);
        assert_eq!(method.params[1].roles, vec![RoleDef::Query("v".to_string())]);
    }

    #[test]
    fn test_client_requires_result() {
        let item: ItemTrait = parse_quote! {
            trait Bad {
                #[get]
                async fn ping(&self) -> u32;
            }
        };
        assert!(parse_client(&item, InterfaceArgs::default()).is_err());
    }

    #[test]
    fn test_unknown_route_method() {
        let item: ItemTrait = parse_quote! {
            trait Bad {
                #[route(method = "FETCH")]
                async fn ping(&self) -> Result<(), ClientError>;
            }
        };
        assert!(parse_client(&item, InterfaceArgs::default()).is_err());
    }

    #[test]
    fn test_parse_rpc() {
        let item: ItemTrait = parse_quote! {
            trait Greeter {
                async fn say_hello(&self, request: Hello) -> Result<Reply, ServiceError>;
                #[rpc(name = "ping")]
                async fn health_check(&self, nothing: ()) -> String;
                async fn pair(&self, a: u32, b: u32);
            }
        };
        let def = parse_rpc(&item, InterfaceArgs::default()).unwrap();
        assert_eq!(def.methods[0].wire_name, "sayHello");
        assert!(matches!(def.methods[0].output, RpcOutput::Result(..)));
        assert_eq!(def.methods[1].wire_name, "ping");
        assert!(matches!(def.methods[1].output, RpcOutput::Plain(_)));
        assert_eq!(def.methods[2].params.len(), 2);
        assert!(matches!(def.methods[2].output, RpcOutput::Unit));

        let TraitItem::Fn(stripped) = &def.trait_def.items[1] else {
            panic!("expected a method");
        };
        assert!(stripped.attrs.is_empty());
    }

    #[test]
    fn test_sync_method_rejected() {
        let item: ItemTrait = parse_quote! {
            trait Bad {
                fn now(&self, x: u32) -> u32;
            }
        };
        assert!(parse_rpc(&item, InterfaceArgs::default()).is_err());
    }
}

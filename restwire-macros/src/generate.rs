//! Code generation for the `#[restwire::client]` and `#[restwire::rpc]` macros.

use crate::parse::{
    ClientDef, ClientMethodDef, QualifierKind, RoleDef, RpcDef, RpcMethodDef, RpcOutput,
};
use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{ItemTrait, TraitItem, TypeParamBound, parse_quote};

/// Re-emit the trait as an object-safe async trait with the given bounds.
fn emit_trait(trait_def: &ItemTrait, bounds: &[TypeParamBound]) -> TokenStream {
    let mut trait_def = trait_def.clone();
    for bound in bounds {
        trait_def.supertraits.push(bound.clone());
    }
    quote! {
        #[::restwire::__private::async_trait]
        #trait_def
    }
}

/// Generate the client struct, its route table and the trait forwarding.
///
/// For a trait named `Profiles` this produces `ProfilesClient`, which
/// implements both `Profiles` and `BoundClient`.
pub fn generate_client(def: &ClientDef) -> TokenStream {
    let trait_name = &def.trait_def.ident;
    let vis = &def.trait_def.vis;
    let client_name = format_ident!("{}Client", trait_name);
    let interface = &def.interface;

    let bounds: Vec<TypeParamBound> = vec![
        parse_quote!(::core::marker::Send),
        parse_quote!(::core::marker::Sync),
    ];
    let trait_tokens = emit_trait(&def.trait_def, &bounds);

    let routes = def.methods.iter().map(generate_route);

    let signatures = def.trait_def.items.iter().filter_map(|item| match item {
        TraitItem::Fn(method) => Some(&method.sig),
        _ => None,
    });
    let forwards = signatures.zip(&def.methods).map(|(sig, method)| {
        let body = generate_forward(method);
        quote! {
            #sig {
                #body
            }
        }
    });

    let doc = format!("Client for [`{}`] generated by `#[restwire::client]`.", trait_name);

    quote! {
        #trait_tokens

        #[doc = #doc]
        #[derive(Clone)]
        #vis struct #client_name {
            proxy: ::std::sync::Arc<::restwire::client::ClientProxy>,
        }

        impl ::restwire::client::BoundClient for #client_name {
            const INTERFACE: &'static str = #interface;

            fn routes() -> ::std::vec::Vec<::restwire::binding::RouteDecl> {
                ::std::vec![#(#routes),*]
            }

            fn from_proxy(proxy: ::std::sync::Arc<::restwire::client::ClientProxy>) -> Self {
                Self { proxy }
            }

            fn proxy(&self) -> &::std::sync::Arc<::restwire::client::ClientProxy> {
                &self.proxy
            }
        }

        #[::restwire::__private::async_trait]
        impl #trait_name for #client_name {
            #(#forwards)*
        }

        impl ::core::fmt::Display for #client_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#interface)
            }
        }

        impl ::core::fmt::Debug for #client_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#interface)
            }
        }

        impl ::core::cmp::PartialEq for #client_name {
            fn eq(&self, other: &Self) -> bool {
                ::std::sync::Arc::ptr_eq(&self.proxy, &other.proxy)
            }
        }

        impl ::core::cmp::Eq for #client_name {}

        impl ::core::hash::Hash for #client_name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::ptr::hash(::std::sync::Arc::as_ptr(&self.proxy), state)
            }
        }
    }
}

/// One `RouteDecl` expression, collected verbatim from the annotations.
fn generate_route(method: &ClientMethodDef) -> TokenStream {
    let name = method.name.to_string();

    let verbs = method.verbs.iter().map(|verb| {
        let ident = syn::Ident::new(&verb.name, verb.span);
        quote_spanned! {verb.span=> .verb(::restwire::__private::http::Method::#ident) }
    });

    let paths = method.paths.iter().map(|path| quote! { .path(#path) });

    let params = method.params.iter().map(|param| {
        let param_name = param.name.to_string();
        let roles = param.roles.iter().map(|role| match role {
            RoleDef::Path(var) => quote! {
                .role(::restwire::binding::ParamRole::PathVariable(::std::string::String::from(#var)))
            },
            RoleDef::Query(key) => quote! {
                .role(::restwire::binding::ParamRole::QueryParam(::std::string::String::from(#key)))
            },
            RoleDef::Body => quote! { .role(::restwire::binding::ParamRole::Body) },
        });
        quote! {
            .param(::restwire::binding::ParamDecl::new(#param_name) #(#roles)*)
        }
    });

    let qualifiers = method.qualifiers.iter().map(|(kind, value)| {
        let variant = match kind {
            QualifierKind::Consumes => quote!(Consumes),
            QualifierKind::Produces => quote!(Produces),
            QualifierKind::Headers => quote!(Headers),
            QualifierKind::Params => quote!(Params),
        };
        quote! {
            .qualifier(::restwire::binding::RouteQualifier::#variant(::std::string::String::from(#value)))
        }
    });

    quote! {
        ::restwire::binding::RouteDecl::new(#name)
            #(#verbs)*
            #(#paths)*
            #(#params)*
            #(#qualifiers)*
    }
}

/// The body of one forwarded client method.
fn generate_forward(method: &ClientMethodDef) -> TokenStream {
    let name = method.name.to_string();
    let output = &method.output;
    let error = &method.error;
    let convert = quote! {
        <#error as ::core::convert::From<::restwire::client::ClientError>>::from
    };
    let args = method.params.iter().map(|param| {
        let ident = &param.name;
        quote! {
            ::restwire::client::to_argument(&#ident).map_err(#convert)?
        }
    });

    quote! {
        let __restwire_args = ::std::vec![#(#args),*];
        self.proxy
            .invoke::<#output>(#name, __restwire_args)
            .await
            .map_err(#convert)
    }
}

/// Generate the service adapter exposing an implementation to a registry.
///
/// For a trait named `Greeter` this produces `GreeterRpc<T>`, which
/// implements `RpcService` for every `T: Greeter`, trait objects included.
pub fn generate_rpc(def: &RpcDef) -> TokenStream {
    let trait_name = &def.trait_def.ident;
    let vis = &def.trait_def.vis;
    let rpc_name = format_ident!("{}Rpc", trait_name);
    let interface = &def.interface;

    let bounds: Vec<TypeParamBound> = vec![
        parse_quote!(::core::marker::Send),
        parse_quote!(::core::marker::Sync),
        parse_quote!('static),
    ];
    let trait_tokens = emit_trait(&def.trait_def, &bounds);

    let methods = def.methods.iter().map(generate_rpc_method);

    let doc = format!(
        "Exposes a [`{}`] implementation through `RpcService`.",
        trait_name
    );

    quote! {
        #trait_tokens

        #[doc = #doc]
        #vis struct #rpc_name<T: ?Sized> {
            service: ::std::sync::Arc<T>,
        }

        impl<T: #trait_name> #rpc_name<T> {
            pub fn new(service: T) -> Self {
                Self {
                    service: ::std::sync::Arc::new(service),
                }
            }
        }

        impl<T: #trait_name + ?Sized> #rpc_name<T> {
            pub fn from_arc(service: ::std::sync::Arc<T>) -> Self {
                Self { service }
            }
        }

        impl<T: ?Sized> ::core::clone::Clone for #rpc_name<T> {
            fn clone(&self) -> Self {
                Self {
                    service: ::std::sync::Arc::clone(&self.service),
                }
            }
        }

        impl<T: #trait_name + ?Sized> ::restwire::server::RpcService for #rpc_name<T> {
            fn interface(&self) -> &'static str {
                #interface
            }

            fn methods(&self) -> ::std::vec::Vec<::restwire::server::RpcMethodDecl> {
                ::std::vec![#(#methods),*]
            }
        }
    }
}

/// One `RpcMethodDecl` expression.
fn generate_rpc_method(method: &RpcMethodDef) -> TokenStream {
    let wire_name = &method.wire_name;
    if method.params.len() != 1 {
        let arity = method.params.len();
        return quote! {
            ::restwire::server::RpcMethodDecl::unsupported(#wire_name, #arity)
        };
    }

    let (input, input_ty) = &method.params[0];
    let name = &method.name;
    let call = quote! { __restwire_service.#name(#input).await };
    let body = match &method.output {
        RpcOutput::Result(..) => call,
        RpcOutput::Plain(_) => quote! {
            ::core::result::Result::<_, ::restwire::server::ServiceError>::Ok(#call)
        },
        RpcOutput::Unit => quote! {
            #call;
            ::core::result::Result::<(), ::restwire::server::ServiceError>::Ok(())
        },
    };

    quote! {
        {
            let __restwire_service = ::std::sync::Arc::clone(&self.service);
            ::restwire::server::RpcMethodDecl::new(#wire_name, move |#input: #input_ty| {
                let __restwire_service = ::std::sync::Arc::clone(&__restwire_service);
                async move { #body }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{InterfaceArgs, parse_client, parse_rpc};

    #[test]
    fn test_client_names_generated_struct() {
        let item: ItemTrait = parse_quote! {
            pub trait Profiles {
                #[get("/profile/{id}")]
                async fn get_profile(&self, #[path] id: u64) -> Result<String, ClientError>;
            }
        };
        let def = parse_client(&item, InterfaceArgs::default()).unwrap();
        let tokens = generate_client(&def).to_string();
        assert!(tokens.contains("pub struct ProfilesClient"));
        assert!(tokens.contains("Method :: GET"));
        assert!(tokens.contains("\"/profile/{id}\""));
        assert!(!tokens.contains("# [get"));
        assert!(!tokens.contains("# [path"));
    }

    #[test]
    fn test_rpc_unsupported_arity() {
        let item: ItemTrait = parse_quote! {
            trait Calculator {
                async fn add(&self, a: i32, b: i32) -> i32;
                async fn negate(&self, a: i32) -> i32;
            }
        };
        let def = parse_rpc(&item, InterfaceArgs::default()).unwrap();
        let tokens = generate_rpc(&def).to_string();
        assert!(tokens.contains("struct CalculatorRpc"));
        assert!(tokens.contains("unsupported (\"add\" , 2usize)"));
        assert!(tokens.contains("RpcMethodDecl :: new (\"negate\""));
    }
}

//! Procedural macros for the restwire framework.
//!
//! This crate provides two attribute macros, both re-exported by `restwire`:
//!
//! - `#[restwire::client]` turns a trait into an HTTP client whose methods
//!   are mapped onto routes
//! - `#[restwire::rpc]` exposes every single-argument method of an
//!   implementation as `POST /<methodName>`
//!
//! # Example
//!
//! ```ignore
//! use restwire::client::ClientError;
//!
//! #[restwire::client]
//! pub trait Profiles {
//!     #[get("/profile/{id}")]
//!     async fn get_profile(&self, #[path] id: u64) -> Result<Profile, ClientError>;
//! }
//! ```
//!
//! This will generate:
//! - The `Profiles` trait, made object safe with `async_trait`
//! - A `ProfilesClient` struct implementing `Profiles` and `BoundClient`

use proc_macro::TokenStream;
use syn::{ItemTrait, Meta, Token, parse_macro_input, punctuated::Punctuated};

mod generate;
mod parse;

/// Generates an HTTP client from a trait.
///
/// # Attributes
///
/// - `name`: interface name reported by the client (defaults to the trait name)
///
/// # Method Attributes
///
/// - `#[get]`, `#[post]`, `#[put]`, `#[delete]`, `#[patch]`, `#[head]`,
///   each optionally with a path: `#[get("/items/{id}")]`
/// - `#[route(method = "GET", path = "/items", ...)]` for the long form.
///   `consumes`, `produces`, `headers` and `params` are accepted and then
///   rejected when the client is bound.
///
/// # Parameter Attributes
///
/// - `#[path]` or `#[path("name")]`: fills a `{name}` placeholder
/// - `#[query]` or `#[query("key")]`: appended to the query string
/// - `#[body]`: encoded as the request body
///
/// Every method must be `async`, take `&self` and return `Result<T, E>`
/// where `T: DeserializeOwned` and `E: From<ClientError>`. Route problems
/// such as a missing verb or an unfilled placeholder are reported by
/// `ClientFactory::bind`, not by the macro.
///
/// # Example
///
/// ```ignore
/// #[restwire::client(name = "search")]
/// pub trait Search {
///     #[get("/items")]
///     async fn find(&self, #[query("q")] text: String) -> Result<Vec<Item>, ClientError>;
///
///     #[route(method = "PUT", path = "/items/{id}")]
///     async fn store(&self, #[path] id: u64, #[body] item: Item) -> Result<(), ClientError>;
/// }
/// ```
#[proc_macro_attribute]
pub fn client(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = parse_macro_input!(attr with Punctuated::<Meta, Token![,]>::parse_terminated);
    let trait_def = parse_macro_input!(item as ItemTrait);

    let attr_args: Vec<Meta> = attr_args.into_iter().collect();
    let args = match parse::parse_interface_args(&attr_args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    if let Err(err) = reject_generics(&trait_def) {
        return err.to_compile_error().into();
    }

    match parse::parse_client(&trait_def, args) {
        Ok(def) => generate::generate_client(&def).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Generates an `RpcService` adapter from a trait.
///
/// For a trait `Greeter` this generates `GreeterRpc<T>`, constructed with
/// `GreeterRpc::new(service)` or `GreeterRpc::from_arc(arc)`. Each method is
/// published under its lowerCamelCase name unless renamed with
/// `#[rpc(name = "...")]`.
///
/// Methods taking exactly one argument are dispatched. Any other arity is
/// registered as unsupported, which makes `RpcRegistryBuilder::build` fail.
/// A method may return `Result<T, E>` with `E: Into<ServiceError>`, a plain
/// `T`, or nothing.
///
/// # Example
///
/// ```ignore
/// #[restwire::rpc]
/// pub trait Greeter {
///     async fn say_hello(&self, request: HelloRequest) -> Result<HelloResponse, ServiceError>;
///
///     #[rpc(name = "ping")]
///     async fn health(&self, probe: ()) -> String;
/// }
/// ```
#[proc_macro_attribute]
pub fn rpc(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr_args = parse_macro_input!(attr with Punctuated::<Meta, Token![,]>::parse_terminated);
    let trait_def = parse_macro_input!(item as ItemTrait);

    let attr_args: Vec<Meta> = attr_args.into_iter().collect();
    let args = match parse::parse_interface_args(&attr_args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };
    if let Err(err) = reject_generics(&trait_def) {
        return err.to_compile_error().into();
    }

    match parse::parse_rpc(&trait_def, args) {
        Ok(def) => generate::generate_rpc(&def).into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn reject_generics(trait_def: &ItemTrait) -> syn::Result<()> {
    if trait_def.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &trait_def.generics,
            "Generic traits are not supported",
        ))
    }
}

//! `#[memoize(...)]`: a thin attribute over
//! `fnmemo::MemoizeBuilder`, in the spirit of the teacher's
//! `#[cache]` — most of the engineering lives in `fnmemo-core`, not
//! here. This macro's only job is turning
//! `#[memoize(capacity = 100, algorithm = "lru")] fn f(...) -> R` into
//! a function backed by a lazily-built, process-lifetime `Memoized`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Expr, ItemFn, Lit, MetaNameValue, Token};

struct MemoizeOptions {
    capacity: Option<Expr>,
    algorithm: Option<String>,
    ttl_ms: Option<Expr>,
    thread_safe: Option<Expr>,
    order_independent: Option<Expr>,
}

impl Parse for MemoizeOptions {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;
        let mut options = MemoizeOptions {
            capacity: None,
            algorithm: None,
            ttl_ms: None,
            thread_safe: None,
            order_independent: None,
        };
        for pair in pairs {
            let name = pair
                .path
                .get_ident()
                .map(|i| i.to_string())
                .unwrap_or_default();
            match name.as_str() {
                "capacity" => options.capacity = Some(pair.value),
                "algorithm" => {
                    options.algorithm = Some(expect_str_literal(&pair.value)?);
                }
                "ttl_ms" => options.ttl_ms = Some(pair.value),
                "thread_safe" => options.thread_safe = Some(pair.value),
                "order_independent" => options.order_independent = Some(pair.value),
                other => {
                    return Err(syn::Error::new(
                        pair.path.span(),
                        format!("unrecognized #[memoize] option `{other}`"),
                    ))
                }
            }
        }
        Ok(options)
    }
}

fn expect_str_literal(expr: &Expr) -> syn::Result<String> {
    if let Expr::Lit(lit) = expr {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new(expr.span(), "expected a string literal"))
}

/// Attaches a cache to a free function.
///
/// ```ignore
/// #[fnmemo::memoize(capacity = 100, algorithm = "lru", ttl_ms = 30_000)]
/// fn fibonacci(n: u64) -> u64 {
///     if n < 2 { n } else { fibonacci(n - 1) + fibonacci(n - 2) }
/// }
/// ```
///
/// Options mirror `fnmemo::MemoizeBuilder`:
/// `capacity` (an integer, or omitted for unbounded), `algorithm`
/// (`"fifo"`, `"lru"`, or `"lfu"`; required when `capacity` is set),
/// `ttl_ms`, `thread_safe`, and `order_independent`.
#[proc_macro_attribute]
pub fn memoize(attr: TokenStream, item: TokenStream) -> TokenStream {
    let options = parse_macro_input!(attr as MemoizeOptions);
    let func = parse_macro_input!(item as ItemFn);
    expand(options, func)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(options: MemoizeOptions, func: ItemFn) -> syn::Result<TokenStream2> {
    if let Some(receiver) = func.sig.receiver() {
        return Err(syn::Error::new(
            receiver.span(),
            "#[memoize] does not support methods; wrap a free function instead",
        ));
    }

    let vis = &func.vis;
    let sig = &func.sig;
    let name = &sig.ident;
    let output = &sig.output;
    let return_ty: TokenStream2 = match output {
        syn::ReturnType::Default => quote!(()),
        syn::ReturnType::Type(_, ty) => quote!(#ty),
    };

    let mut arg_names = Vec::new();
    let mut arg_types = Vec::new();
    for input in &sig.inputs {
        match input {
            syn::FnArg::Typed(pat_type) => {
                arg_names.push((*pat_type.pat).clone());
                arg_types.push((*pat_type.ty).clone());
            }
            syn::FnArg::Receiver(r) => {
                return Err(syn::Error::new(
                    r.span(),
                    "#[memoize] does not support methods; wrap a free function instead",
                ))
            }
        }
    }

    if arg_names.is_empty() {
        let warning = quote_spanned! { name.span() =>
            ::fnmemo::tracing::warn!(
                function = stringify!(#name),
                "memoizing a zero-argument function caches a single value for the lifetime of the process"
            );
        };
        return Ok(build_fn(
            &vis,
            name,
            &sig.inputs,
            &[],
            &return_ty,
            &quote!(()),
            &quote!(()),
            &func.block,
            &options,
            Some(warning),
        ));
    }

    let arg_tuple_ty = quote!((#(#arg_types,)*));
    let arg_tuple_value = quote!((#(#arg_names.clone(),)*));

    Ok(build_fn(
        &vis,
        name,
        &sig.inputs,
        &arg_names,
        &return_ty,
        &arg_tuple_ty,
        &arg_tuple_value,
        &func.block,
        &options,
        None,
    ))
}

#[allow(clippy::too_many_arguments)]
fn build_fn(
    vis: &syn::Visibility,
    name: &syn::Ident,
    inputs: &Punctuated<syn::FnArg, Token![,]>,
    arg_names: &[syn::Pat],
    return_ty: &TokenStream2,
    arg_tuple_ty: &TokenStream2,
    arg_tuple_value: &TokenStream2,
    body: &syn::Block,
    options: &MemoizeOptions,
    zero_arg_warning: Option<TokenStream2>,
) -> TokenStream2 {
    let capacity_expr = match &options.capacity {
        Some(capacity) => quote!(::fnmemo::Capacity::Bounded((#capacity) as usize)),
        None => quote!(::fnmemo::Capacity::Unbounded),
    };

    let algorithm_expr = match options.algorithm.as_deref() {
        Some("fifo") => quote!(::fnmemo::Algorithm::Fifo),
        Some("lru") => quote!(::fnmemo::Algorithm::Lru),
        Some("lfu") => quote!(::fnmemo::Algorithm::Lfu),
        Some(other) => {
            let message = format!("unrecognized #[memoize] algorithm `{other}`");
            return quote!(compile_error!(#message););
        }
        None => quote!(::fnmemo::Algorithm::Lru),
    };

    let ttl_call = options
        .ttl_ms
        .as_ref()
        .map(|ms| quote!(.ttl(::std::time::Duration::from_millis((#ms) as u64))));

    let thread_safe_call = options
        .thread_safe
        .as_ref()
        .map(|v| quote!(.thread_safe(#v)));

    let order_independent_call = options
        .order_independent
        .as_ref()
        .map(|v| quote!(.order_independent(#v)));

    quote! {
        #vis fn #name(#inputs) -> #return_ty {
            #zero_arg_warning

            fn __memoize_inner(__args: #arg_tuple_ty) -> #return_ty {
                let (#(#arg_names,)*) = __args;
                #body
            }

            static __MEMOIZE_CACHE: ::fnmemo::once_cell::sync::Lazy<
                ::fnmemo::Memoized<fn(#arg_tuple_ty) -> #return_ty, #arg_tuple_ty, #return_ty>,
            > = ::fnmemo::once_cell::sync::Lazy::new(|| {
                ::fnmemo::MemoizeBuilder::new(__memoize_inner as fn(#arg_tuple_ty) -> #return_ty)
                    .capacity(#capacity_expr)
                    .algorithm(#algorithm_expr)
                    #ttl_call
                    #thread_safe_call
                    #order_independent_call
                    .build::<#arg_tuple_ty, #return_ty>()
                    .expect("invalid #[memoize] configuration")
            });

            __MEMOIZE_CACHE.call(#arg_tuple_value)
        }
    }
}

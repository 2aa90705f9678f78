//! # schemagen Derive
//!
//! Procedural macros for schemagen type descriptors.
//!
//! This crate provides `#[derive(Reflect)]`, which implements
//! `schemagen_core::Reflect` for structs with named fields.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DataStruct, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derives `schemagen_core::Reflect` for a struct.
///
/// Field attributes:
/// - `#[schema(rename = "key")]` emits the field under `key`
/// - `#[schema(skip)]` leaves the field out of the schema
/// - `#[schema(flatten)]` merges a nested struct's fields into the parent
///
/// Container attribute:
/// - `#[schema(path = "crate::module::Type")]` overrides the path used to
///   name the type in generated code (defaults to `module_path!()::Type`)
///
/// # Example
/// ```ignore
/// #[derive(Default, Reflect)]
/// struct SwitchSpec {
///     name: String,
///     #[schema(rename = "mtu_bytes")]
///     max_mtu: Option<u32>,
///     #[schema(flatten)]
///     common: CommonSpec,
///     #[schema(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(schema))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_reflect(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.into_compile_error()),
    }
}

fn expand_reflect(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Reflect can only be derived for structs with named fields",
            ));
        }
    };

    let name = &input.ident;
    let name_str = name.to_string();
    let path = match container_path(&input.attrs)? {
        Some(path) => quote! { #path },
        None => quote! { concat!(module_path!(), "::", #name_str) },
    };

    let mut field_descs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let ident_str = ident.to_string();
        let ty = &field.ty;
        let hints = FieldHints::from_attrs(&field.attrs)?;
        let hints = hints.to_tokens();

        field_descs.push(quote! {
            ::schemagen_core::FieldDesc::new(
                #ident_str,
                <#ty as ::schemagen_core::Reflect>::type_desc,
            )
            .with_hints(#hints)
        });
    }

    Ok(quote! {
        impl ::schemagen_core::Reflect for #name {
            fn type_desc() -> ::schemagen_core::TypeDesc {
                ::schemagen_core::TypeDesc::structure(
                    #name_str,
                    #path,
                    ::std::vec![#(#field_descs),*],
                )
            }
        }
    })
}

/// Parsed `#[schema(...)]` field attributes.
#[derive(Default)]
struct FieldHints {
    rename: Option<LitStr>,
    skip: bool,
    flatten: bool,
}

impl FieldHints {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut hints = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    hints.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    hints.skip = true;
                    Ok(())
                } else if meta.path.is_ident("flatten") {
                    hints.flatten = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported schema field attribute"))
                }
            })?;
        }
        if hints.skip && hints.flatten {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`skip` and `flatten` cannot be combined",
            ));
        }
        Ok(hints)
    }

    fn to_tokens(&self) -> TokenStream2 {
        let rename = match &self.rename {
            Some(lit) => quote! {
                ::core::option::Option::Some(::std::borrow::Cow::Borrowed(#lit))
            },
            None => quote! { ::core::option::Option::None },
        };
        let skip = self.skip;
        let flatten = self.flatten;
        quote! {
            ::schemagen_core::FieldHints {
                rename: #rename,
                skip: #skip,
                flatten: #flatten,
            }
        }
    }
}

/// Reads the container-level `#[schema(path = "...")]` override.
fn container_path(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut path = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("path") {
                path = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported schema container attribute"))
            }
        })?;
    }
    Ok(path)
}

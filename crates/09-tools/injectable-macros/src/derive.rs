//! Injectable 派生宏实现

use crate::utils::{arc_inner_type, optional_arc_inner_type};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Field, Fields, Result};

/// 实现 #[derive(Injectable)]
pub fn derive_injectable_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Injectable)] 不支持泛型类型",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new_spanned(
                name,
                "#[derive(Injectable)] 只能用于 struct",
            ))
        }
    };

    let construct = match fields {
        Fields::Named(named) => {
            let initializers = named.named.iter().map(|field| {
                let ident = &field.ident;
                let value = field_value(field);
                quote! { #ident: #value }
            });
            quote! { Self { #(#initializers),* } }
        }
        Fields::Unnamed(unnamed) => {
            let values = unnamed.unnamed.iter().map(field_value);
            quote! { Self ( #(#values),* ) }
        }
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        #[::async_trait::async_trait]
        impl ::di_abstractions::Injectable for #name {
            async fn inject(
                resolver: &dyn ::di_abstractions::ServiceResolver,
            ) -> ::core::result::Result<Self, ::infrastructure_common::DependencyError> {
                ::core::result::Result::Ok(#construct)
            }
        }
    })
}

/// `Arc<T>` 必须可解析，`Option<Arc<T>>` 可缺省，其余字段使用 `Default`
fn field_value(field: &Field) -> TokenStream2 {
    if let Some(inner) = arc_inner_type(&field.ty) {
        quote! {
            <dyn ::di_abstractions::ServiceResolver as ::di_abstractions::ServiceResolverExt>
                ::resolve::<#inner>(resolver)
                .await?
        }
    } else if let Some(inner) = optional_arc_inner_type(&field.ty) {
        quote! {
            <dyn ::di_abstractions::ServiceResolver as ::di_abstractions::ServiceResolverExt>
                ::try_resolve::<#inner>(resolver)
                .await?
        }
    } else {
        quote! { ::core::default::Default::default() }
    }
}

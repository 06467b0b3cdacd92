//! 可注入工厂宏实现

use crate::utils::generate_unique_ident;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, Error, Ident, Item, Result, Token, Type};

/// `#[injectable_factory]` 参数
#[derive(Default)]
pub struct FactoryArgs {
    /// 类型化工厂的产出类型
    pub produces: Option<Type>,
}

impl Parse for FactoryArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = FactoryArgs::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            if key != "produces" {
                return Err(Error::new(
                    key.span(),
                    format!("未知的 injectable_factory 参数 `{}`", key),
                ));
            }
            input.parse::<Token![=]>()?;
            args.produces = Some(input.parse()?);

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

/// 实现 #[injectable_factory] 宏
pub fn injectable_factory_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let factory_args = if args.is_empty() {
        FactoryArgs::default()
    } else {
        match syn::parse::<FactoryArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let item = match syn::parse::<Item>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    let registration = match expand_factory_registration(&factory_args, &item) {
        Ok(registration) => registration,
        Err(e) => e.to_compile_error(),
    };

    quote! {
        #item
        #registration
    }
    .into()
}

fn expand_factory_registration(args: &FactoryArgs, item: &Item) -> Result<TokenStream2> {
    let (ident, generics) = match item {
        Item::Struct(item) => (&item.ident, &item.generics),
        Item::Enum(item) => (&item.ident, &item.generics),
        other => {
            return Err(Error::new_spanned(
                other,
                "#[injectable_factory] 只能用于 struct 或 enum",
            ))
        }
    };
    if !generics.params.is_empty() {
        return Err(Error::new_spanned(
            generics,
            "#[injectable_factory] 不支持泛型类型",
        ));
    }

    let registration = match &args.produces {
        Some(product) => quote! {
            ::di_abstractions::FactoryRegistration::typed::<#ident, #product>()
        },
        None => quote! {
            ::di_abstractions::FactoryRegistration::untyped::<#ident>()
        },
    };

    let register_fn = generate_unique_ident(&ident.to_string(), "register_factory", "");

    Ok(quote! {
        const _: () = {
            #[::ctor::ctor]
            fn #register_fn() {
                ::di_abstractions::register_global_factory(#registration);
            }
        };
    })
}

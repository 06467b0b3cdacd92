//! 可注入描述符宏实现

use crate::utils::generate_unique_ident;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_quote, Error, Generics, Ident, Item, LitBool, LitInt,
    Result, Token, Type,
};

/// 生命周期参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InjectableLifetime {
    Transient,
    #[default]
    Scoped,
    Singleton,
}

impl InjectableLifetime {
    fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "transient" => Ok(Self::Transient),
            "scoped" => Ok(Self::Scoped),
            "singleton" => Ok(Self::Singleton),
            other => Err(Error::new(
                ident.span(),
                format!("未知的生命周期 `{}`，可选值为 transient、scoped、singleton", other),
            )),
        }
    }

    fn path(self) -> TokenStream2 {
        match self {
            Self::Transient => quote! { ::infrastructure_common::Lifetime::Transient },
            Self::Scoped => quote! { ::infrastructure_common::Lifetime::Scoped },
            Self::Singleton => quote! { ::infrastructure_common::Lifetime::Singleton },
        }
    }
}

/// `#[injectable]` 参数
#[derive(Default)]
pub struct InjectableArgs {
    pub target: Option<Type>,
    pub implementation: Option<Type>,
    pub lifetime: InjectableLifetime,
    pub instantiate_on_boot: bool,
    pub boot_priority: Option<u8>,
    pub sort_order: i32,
    pub factory: Option<Type>,
}

impl Parse for InjectableArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = InjectableArgs::default();

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            let name = key.to_string();

            if input.peek(Token![=]) {
                input.parse::<Token![=]>()?;
                match name.as_str() {
                    "target" => args.target = Some(input.parse()?),
                    "implementation" => args.implementation = Some(input.parse()?),
                    "factory" => args.factory = Some(input.parse()?),
                    "lifetime" => {
                        let value: Ident = input.parse()?;
                        args.lifetime = InjectableLifetime::from_ident(&value)?;
                    }
                    "instantiate_on_boot" => {
                        let value: LitBool = input.parse()?;
                        args.instantiate_on_boot = value.value;
                    }
                    "boot_priority" => {
                        let value: LitInt = input.parse()?;
                        let priority = value.base10_parse::<u8>().map_err(|_| {
                            Error::new(value.span(), "boot_priority 必须在 0..=255 范围内")
                        })?;
                        args.boot_priority = Some(priority);
                    }
                    "sort_order" => args.sort_order = parse_signed(input)?,
                    _ => return Err(unknown_argument(&key)),
                }
            } else {
                match name.as_str() {
                    "singleton" | "scoped" | "transient" => {
                        args.lifetime = InjectableLifetime::from_ident(&key)?;
                    }
                    "instantiate_on_boot" => args.instantiate_on_boot = true,
                    _ => return Err(unknown_argument(&key)),
                }
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

fn unknown_argument(key: &Ident) -> Error {
    Error::new(key.span(), format!("未知的 injectable 参数 `{}`", key))
}

fn parse_signed(input: ParseStream) -> Result<i32> {
    let negative = input.parse::<Option<Token![-]>>()?.is_some();
    let value: LitInt = input.parse()?;
    let magnitude = value.base10_parse::<i64>()?;
    let signed = if negative { -magnitude } else { magnitude };
    i32::try_from(signed).map_err(|_| Error::new(value.span(), "sort_order 超出 i32 范围"))
}

/// 被标注的项
struct AnnotatedItem {
    ident: Ident,
    declared: Type,
    is_trait: bool,
}

impl AnnotatedItem {
    fn from_item(item: &Item) -> Result<Self> {
        let (ident, generics, is_trait) = match item {
            Item::Struct(item) => (&item.ident, &item.generics, false),
            Item::Enum(item) => (&item.ident, &item.generics, false),
            Item::Trait(item) => (&item.ident, &item.generics, true),
            other => {
                return Err(Error::new_spanned(
                    other,
                    "#[injectable] 只能用于 struct、enum 或 trait",
                ))
            }
        };
        reject_generics(generics)?;

        let declared: Type = if is_trait {
            parse_quote!(dyn #ident)
        } else {
            parse_quote!(#ident)
        };

        Ok(Self {
            ident: ident.clone(),
            declared,
            is_trait,
        })
    }
}

fn reject_generics(generics: &Generics) -> Result<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(Error::new_spanned(
            generics,
            "#[injectable] 不支持泛型类型，请为具体类型声明",
        ))
    }
}

/// 实现 #[injectable] 宏
pub fn injectable_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let injectable_args = if args.is_empty() {
        InjectableArgs::default()
    } else {
        match syn::parse::<InjectableArgs>(args.clone()) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let item = match syn::parse::<Item>(input) {
        Ok(item) => item,
        Err(e) => return e.to_compile_error().into(),
    };

    match expand_registration(&injectable_args, &item, &args.to_string()) {
        Ok(registration) => quote! {
            #item
            #registration
        }
        .into(),
        Err(e) => {
            let error = e.to_compile_error();
            quote! {
                #item
                #error
            }
            .into()
        }
    }
}

fn expand_registration(
    args: &InjectableArgs,
    item: &Item,
    discriminator: &str,
) -> Result<TokenStream2> {
    let annotated = AnnotatedItem::from_item(item)?;

    if annotated.is_trait && args.implementation.is_none() && args.factory.is_none() {
        return Err(Error::new(
            annotated.ident.span(),
            "trait 上的 #[injectable] 需要 implementation 或 factory 参数",
        ));
    }

    let declared = &annotated.declared;
    let descriptor = descriptor_tokens(args);

    // 经由工厂构造时不需要直接构造器
    let activator = if args.factory.is_some() {
        quote! {}
    } else {
        let implementation = args.implementation.as_ref().unwrap_or(declared);
        let target = args.target.as_ref().unwrap_or(declared);
        quote! {
            .with_activator(::di_abstractions::Activator::of::<#implementation, #target>(
                |created| created,
            ))
        }
    };

    let register_fn =
        generate_unique_ident(&annotated.ident.to_string(), "register_injectable", discriminator);

    Ok(quote! {
        const _: () = {
            #[::ctor::ctor]
            fn #register_fn() {
                ::di_abstractions::register_global_declaration(
                    ::di_abstractions::InjectableDeclaration::new::<#declared>(#descriptor)
                        #activator,
                );
            }
        };
    })
}

fn descriptor_tokens(args: &InjectableArgs) -> TokenStream2 {
    let mut chain = quote! { ::infrastructure_common::InjectableDescriptor::builder() };

    if let Some(target) = &args.target {
        chain = quote! { #chain.target::<#target>() };
    }
    if let Some(implementation) = &args.implementation {
        chain = quote! { #chain.implementation::<#implementation>() };
    }
    if let Some(factory) = &args.factory {
        chain = quote! { #chain.factory::<#factory>() };
    }
    if let Some(priority) = args.boot_priority {
        chain = quote! { #chain.boot_priority(#priority) };
    }

    let lifetime = args.lifetime.path();
    let instantiate_on_boot = args.instantiate_on_boot;
    let sort_order = args.sort_order;

    quote! {
        #chain
            .lifetime(#lifetime)
            .instantiate_on_boot(#instantiate_on_boot)
            .sort_order(#sort_order)
            .build()
    }
}

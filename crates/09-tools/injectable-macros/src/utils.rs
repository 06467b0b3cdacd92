//! 宏工具函数

use proc_macro2::Span;
use syn::{GenericArgument, Ident, PathArguments, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                if let Some(GenericArgument::Type(inner_type)) = args.args.first() {
                    return Some(inner_type);
                }
            }
        }
    }
    None
}

/// 检查类型路径的最后一段是否为指定名称
fn last_segment_is(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == name)
            .unwrap_or(false),
        _ => false,
    }
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    last_segment_is(ty, "Option")
}

/// 检查类型是否为 Arc<T>
pub fn is_arc_type(ty: &Type) -> bool {
    last_segment_is(ty, "Arc")
}

/// 提取 `Arc<T>` 中的 `T`
pub fn arc_inner_type(ty: &Type) -> Option<&Type> {
    if is_arc_type(ty) {
        extract_generic_type(ty)
    } else {
        None
    }
}

/// 提取 `Option<Arc<T>>` 中的 `T`
pub fn optional_arc_inner_type(ty: &Type) -> Option<&Type> {
    if is_option_type(ty) {
        extract_generic_type(ty).and_then(arc_inner_type)
    } else {
        None
    }
}

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

/// 生成唯一的标识符
///
/// 同一类型上可以堆叠多个属性，`discriminator` 区分它们生成的注册函数。
pub fn generate_unique_ident(base_name: &str, suffix: &str, discriminator: &str) -> Ident {
    let unique_name = format!(
        "__{}__{}_{:016x}",
        to_snake_case(base_name),
        suffix,
        fnv1a(discriminator)
    );
    Ident::new(&unique_name, Span::call_site())
}

/// FNV-1a 哈希，结果在不同编译之间保持稳定
fn fnv1a(input: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    input.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

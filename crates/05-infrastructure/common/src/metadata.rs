//! 类型元数据
//!
//! 提供不依赖反射的类型引用

use serde::Serialize;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性和哈希只比较 [`TypeId`]，名称仅用于诊断输出。
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TypeInfo {
    /// 类型名称（不含模块路径）
    pub name: &'static str,
    /// 类型ID
    #[serde(skip)]
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 trait object（`dyn Trait`）
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: short_type_name(full_name),
            id: TypeId::of::<T>(),
            module_path: full_name,
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        self.name
    }

    /// 类型是否位于指定模块路径之下，前缀按 `::` 分段匹配
    pub fn is_in_module(&self, prefix: &str) -> bool {
        let path = self.module_path.strip_prefix("dyn ").unwrap_or(self.module_path);
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with("::"),
            None => false,
        }
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_path)
    }
}

/// 去掉路径部分，保留泛型参数；trait object 保留完整路径
fn short_type_name(full_name: &'static str) -> &'static str {
    if full_name.starts_with("dyn ") {
        return full_name;
    }
    let head = full_name.split('<').next().unwrap_or(full_name);
    match head.rfind("::") {
        Some(index) => &full_name[index + 2..],
        None => full_name,
    }
}

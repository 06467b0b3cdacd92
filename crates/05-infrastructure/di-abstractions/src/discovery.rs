//! 可注入声明的发现
//!
//! Rust 没有运行时反射，声明保存在以类型标识为键的目录中。`#[injectable]` 宏在进程启动时
//! 通过 `ctor` 把声明写入全局目录，也可以手动构建 [`InjectableCatalog`]。

use crate::factory::FactoryRegistration;
use crate::registry::Activator;
use infrastructure_common::{InjectableDescriptor, TypeInfo};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// 可注入声明
///
/// 一个描述符和它所附加的类型。
#[derive(Debug, Clone)]
pub struct InjectableDeclaration {
    /// 被标注的类型
    pub declared: TypeInfo,
    /// 描述符
    pub descriptor: InjectableDescriptor,
    /// 直接构造器，经由工厂构造时可以为空
    pub activator: Option<Activator>,
}

impl InjectableDeclaration {
    /// 创建声明
    pub fn new<D: ?Sized + 'static>(descriptor: InjectableDescriptor) -> Self {
        Self {
            declared: TypeInfo::of::<D>(),
            descriptor,
            activator: None,
        }
    }

    /// 设置直接构造器
    pub fn with_activator(mut self, activator: Activator) -> Self {
        self.activator = Some(activator);
        self
    }
}

/// 可注入目录
///
/// 声明按加入顺序保存，这个顺序就是扫描顺序。
#[derive(Debug, Clone, Default)]
pub struct InjectableCatalog {
    declarations: Vec<InjectableDeclaration>,
    factories: HashMap<TypeId, FactoryRegistration>,
}

impl InjectableCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加声明
    pub fn declare(&mut self, declaration: InjectableDeclaration) -> &mut Self {
        debug!(
            "添加可注入声明: {} -> {}",
            declaration.declared,
            declaration.descriptor.resolve_target(&declaration.declared)
        );
        self.declarations.push(declaration);
        self
    }

    /// 添加工厂，同一工厂类型重复添加时保留后者
    pub fn add_factory(&mut self, registration: FactoryRegistration) -> &mut Self {
        debug!("添加工厂: {}", registration.factory_type());
        self.factories
            .insert(registration.factory_type().id, registration);
        self
    }

    /// 所有声明（扫描顺序）
    pub fn declarations(&self) -> &[InjectableDeclaration] {
        &self.declarations
    }

    /// 指定类型上的声明
    pub fn declarations_of(&self, declared: &TypeInfo) -> Vec<&InjectableDeclaration> {
        self.declarations
            .iter()
            .filter(|declaration| declaration.declared == *declared)
            .collect()
    }

    /// 查找工厂
    pub fn factory(&self, factory_type: &TypeInfo) -> Option<&FactoryRegistration> {
        self.factories.get(&factory_type.id)
    }

    /// 声明数量
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// 是否没有任何声明
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// 合并另一个目录
    pub fn extend(&mut self, other: InjectableCatalog) {
        self.declarations.extend(other.declarations);
        self.factories.extend(other.factories);
    }
}

/// 全局可注入目录
static GLOBAL_INJECTABLE_CATALOG: Lazy<RwLock<InjectableCatalog>> =
    Lazy::new(|| RwLock::new(InjectableCatalog::new()));

/// 注册全局声明
pub fn register_global_declaration(declaration: InjectableDeclaration) {
    GLOBAL_INJECTABLE_CATALOG.write().declare(declaration);
}

/// 注册全局工厂
pub fn register_global_factory(registration: FactoryRegistration) {
    GLOBAL_INJECTABLE_CATALOG.write().add_factory(registration);
}

/// 获取全局目录快照
pub fn global_catalog() -> InjectableCatalog {
    GLOBAL_INJECTABLE_CATALOG.read().clone()
}

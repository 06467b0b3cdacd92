//! 可注入描述符
//!
//! 描述一次期望的服务注册：注册到哪个抽象、由哪个具体类型实现、使用何种生命周期、
//! 是否经由工厂构造，以及是否在启动时提前实例化。
//!
//! 描述符是纯数据，不做校验。默认值规则由 [`InjectableDescriptor::resolve_target`]、
//! [`InjectableDescriptor::resolve_implementation`] 和
//! [`InjectableDescriptor::factory_product`] 给出，扫描器据此生成注册请求。

use crate::lifecycle::Lifetime;
use crate::metadata::TypeInfo;

/// 默认启动优先级（最低）
pub const DEFAULT_BOOT_PRIORITY: u8 = u8::MAX;

/// 可注入描述符
///
/// 同一个声明上可以附加多个描述符，每个描述符独立产生一次注册。
///
/// `boot_priority` 只能在构造时指定，之后不可修改：
///
/// ```compile_fail
/// use infrastructure_common::InjectableDescriptor;
///
/// let mut descriptor = InjectableDescriptor::new();
/// descriptor.boot_priority = 3;
/// ```
///
/// 其余属性可以在注册前由扫描器调整：
///
/// ```
/// use infrastructure_common::{InjectableDescriptor, Lifetime};
///
/// let mut descriptor = InjectableDescriptor::builder().boot_priority(3).build();
/// descriptor.lifetime = Lifetime::Singleton;
/// descriptor.sort_order = -1;
/// assert_eq!(descriptor.boot_priority(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectableDescriptor {
    /// 注册的目标抽象，为空时注册到被标注的类型自身
    pub target_type: Option<TypeInfo>,
    /// 实际构造的具体类型，为空时使用被标注的类型
    pub implementation: Option<TypeInfo>,
    /// 服务生命周期
    pub lifetime: Lifetime,
    /// 是否在启动时提前实例化
    pub instantiate_on_boot: bool,
    /// 同一目标多个描述符之间的排序提示，数值小的在前
    pub sort_order: i32,
    /// 工厂类型，设置后必须经由该工厂构造实例
    pub factory: Option<TypeInfo>,
    boot_priority: u8,
}

impl InjectableDescriptor {
    /// 创建默认描述符：自注册、作用域生命周期、不提前实例化、最低启动优先级、无工厂
    pub fn new() -> Self {
        Self {
            target_type: None,
            implementation: None,
            lifetime: Lifetime::default(),
            instantiate_on_boot: false,
            sort_order: 0,
            factory: None,
            boot_priority: DEFAULT_BOOT_PRIORITY,
        }
    }

    /// 创建描述符构建器
    pub fn builder() -> InjectableDescriptorBuilder {
        InjectableDescriptorBuilder::default()
    }

    /// 注册到指定抽象，实现类型默认为被标注的类型
    pub fn for_target<T: ?Sized + 'static>() -> Self {
        Self::builder().target::<T>().build()
    }

    /// 使用指定实现类型，与被标注的类型无关
    pub fn with_implementation<I: ?Sized + 'static>() -> Self {
        Self::builder().implementation::<I>().build()
    }

    /// 启动优先级，数值越小越先实例化
    pub fn boot_priority(&self) -> u8 {
        self.boot_priority
    }

    /// 解析注册目标
    pub fn resolve_target(&self, declared: &TypeInfo) -> TypeInfo {
        self.target_type.unwrap_or(*declared)
    }

    /// 解析实现类型；显式指定时原样返回
    pub fn resolve_implementation(&self, declared: &TypeInfo) -> TypeInfo {
        self.implementation.unwrap_or(*declared)
    }

    /// 工厂必须产出的类型
    ///
    /// 依次取实现类型、目标类型、被标注的类型。
    pub fn factory_product(&self, declared: &TypeInfo) -> TypeInfo {
        self.implementation
            .or(self.target_type)
            .unwrap_or(*declared)
    }

    /// 是否注册到被标注的类型自身
    pub fn is_self_registration(&self, declared: &TypeInfo) -> bool {
        self.resolve_target(declared) == *declared
    }

    /// 是否经由工厂构造
    pub fn uses_factory(&self) -> bool {
        self.factory.is_some()
    }
}

impl Default for InjectableDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

/// 描述符构建器
///
/// 对应声明时的可选命名参数，未设置的参数取默认值。
#[derive(Debug, Clone)]
pub struct InjectableDescriptorBuilder {
    descriptor: InjectableDescriptor,
}

impl Default for InjectableDescriptorBuilder {
    fn default() -> Self {
        Self {
            descriptor: InjectableDescriptor::new(),
        }
    }
}

impl InjectableDescriptorBuilder {
    /// 设置目标抽象
    pub fn target<T: ?Sized + 'static>(mut self) -> Self {
        self.descriptor.target_type = Some(TypeInfo::of::<T>());
        self
    }

    /// 设置目标抽象（类型信息）
    pub fn target_type(mut self, target: TypeInfo) -> Self {
        self.descriptor.target_type = Some(target);
        self
    }

    /// 设置实现类型
    pub fn implementation<I: ?Sized + 'static>(mut self) -> Self {
        self.descriptor.implementation = Some(TypeInfo::of::<I>());
        self
    }

    /// 设置实现类型（类型信息）
    pub fn implementation_type(mut self, implementation: TypeInfo) -> Self {
        self.descriptor.implementation = Some(implementation);
        self
    }

    /// 设置生命周期
    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.descriptor.lifetime = lifetime;
        self
    }

    /// 设置是否在启动时实例化
    pub fn instantiate_on_boot(mut self, enabled: bool) -> Self {
        self.descriptor.instantiate_on_boot = enabled;
        self
    }

    /// 设置启动优先级
    pub fn boot_priority(mut self, priority: u8) -> Self {
        self.descriptor.boot_priority = priority;
        self
    }

    /// 设置排序提示
    pub fn sort_order(mut self, order: i32) -> Self {
        self.descriptor.sort_order = order;
        self
    }

    /// 设置工厂类型
    pub fn factory<F: ?Sized + 'static>(mut self) -> Self {
        self.descriptor.factory = Some(TypeInfo::of::<F>());
        self
    }

    /// 设置工厂类型（类型信息）
    pub fn factory_type(mut self, factory: TypeInfo) -> Self {
        self.descriptor.factory = Some(factory);
        self
    }

    /// 构建描述符
    pub fn build(self) -> InjectableDescriptor {
        self.descriptor
    }
}

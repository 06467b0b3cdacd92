//! 注册请求与直接构造

use crate::factory::FactoryInvocation;
use crate::resolver::{Injectable, Instance, ServiceResolver};
use async_trait::async_trait;
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// 直接构造的内部接口
#[async_trait]
trait Activation: Send + Sync {
    async fn activate(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError>;
}

/// 构造实现类型并转换为目标抽象
struct DirectActivation<I, T>
where
    T: ?Sized,
{
    cast: fn(Arc<I>) -> Arc<T>,
}

#[async_trait]
impl<I, T> Activation for DirectActivation<I, T>
where
    I: Injectable,
    T: ?Sized + Send + Sync + 'static,
{
    async fn activate(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        let created = I::inject(resolver).await?;
        Ok(Instance::new::<T>((self.cast)(Arc::new(created))))
    }
}

/// 直接构造器
///
/// 未指定工厂时的构造路径。Rust 没有运行时反射，向 trait object 的转换由声明处提供：
///
/// ```ignore
/// Activator::of::<InjectedAsInterface, dyn GreetingService>(|created| created)
/// ```
#[derive(Clone)]
pub struct Activator {
    implementation: TypeInfo,
    target: TypeInfo,
    activation: Arc<dyn Activation>,
}

impl Activator {
    /// 创建构造器，`cast` 负责把实现转换为目标抽象
    pub fn of<I, T>(cast: fn(Arc<I>) -> Arc<T>) -> Self
    where
        I: Injectable,
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            implementation: TypeInfo::of::<I>(),
            target: TypeInfo::of::<T>(),
            activation: Arc::new(DirectActivation { cast }),
        }
    }

    /// 注册到实现类型自身的构造器
    pub fn of_self<I: Injectable>() -> Self {
        Self::of::<I, I>(|created| created)
    }

    /// 实现类型
    pub fn implementation(&self) -> &TypeInfo {
        &self.implementation
    }

    /// 目标抽象
    pub fn target(&self) -> &TypeInfo {
        &self.target
    }

    /// 构造实例
    pub async fn activate(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        self.activation.activate(resolver).await
    }
}

impl fmt::Debug for Activator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activator")
            .field("implementation", &self.implementation.module_path)
            .field("target", &self.target.module_path)
            .finish()
    }
}

/// 构造方式
#[derive(Debug, Clone)]
pub enum Construction {
    /// 直接构造实现类型
    Direct(Activator),
    /// 经由工厂构造
    Factory(FactoryInvocation),
}

impl Construction {
    /// 是否经由工厂构造
    pub fn is_factory(&self) -> bool {
        matches!(self, Construction::Factory(_))
    }

    /// 按构造方式创建实例
    pub async fn construct(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        match self {
            Construction::Direct(activator) => activator.activate(resolver).await,
            Construction::Factory(invocation) => invocation.invoke(resolver).await,
        }
    }
}

/// 注册请求
///
/// 扫描器从一个描述符推导出的注册元组。
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// 被标注的类型
    pub declared: TypeInfo,
    /// 注册目标
    pub target: TypeInfo,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 排序提示
    pub sort_order: i32,
    /// 是否启动时实例化
    pub instantiate_on_boot: bool,
    /// 启动优先级
    pub boot_priority: u8,
    /// 构造方式
    pub construction: Construction,
}

impl RegistrationRequest {
    /// 生成可序列化的摘要
    pub fn summary(&self) -> RegistrationSummary {
        RegistrationSummary {
            declared: self.declared.module_path,
            target: self.target.module_path,
            implementation: self.implementation.module_path,
            lifetime: self.lifetime,
            sort_order: self.sort_order,
            instantiate_on_boot: self.instantiate_on_boot,
            boot_priority: self.boot_priority,
            factory: match &self.construction {
                Construction::Direct(_) => None,
                Construction::Factory(invocation) => Some(invocation.factory_type().module_path),
            },
        }
    }
}

/// 注册请求摘要
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationSummary {
    pub declared: &'static str,
    pub target: &'static str,
    pub implementation: &'static str,
    pub lifetime: Lifetime,
    pub sort_order: i32,
    pub instantiate_on_boot: bool,
    pub boot_priority: u8,
    pub factory: Option<&'static str>,
}

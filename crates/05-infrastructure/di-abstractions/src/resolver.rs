//! 服务解析器抽象接口
//!
//! 提供给工厂和直接构造使用的解析能力

use async_trait::async_trait;
use infrastructure_common::{DependencyError, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除的共享实例
///
/// 内部保存 `Arc<T>`，`T` 可以是 trait object。
#[derive(Clone)]
pub struct Instance {
    type_info: TypeInfo,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// 包装共享实例
    pub fn new<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// 实例的类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_info.is::<T>()
    }

    /// 转换为具体类型
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// 转换为具体类型，失败时返回类型不匹配错误
    pub fn try_downcast<T>(&self) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.downcast::<T>().ok_or_else(|| {
            DependencyError::type_mismatch(
                std::any::type_name::<T>(),
                self.type_info.module_path,
            )
        })
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_info", &self.type_info.module_path)
            .finish()
    }
}

/// 服务解析器 trait
///
/// 由外部容器实现，工厂通过它获取依赖。
#[async_trait]
pub trait ServiceResolver: Send + Sync {
    /// 解析注册到指定目标的实例
    async fn resolve_instance(&self, target: &TypeInfo) -> Result<Instance, DependencyError>;

    /// 检查是否可以解析指定目标
    fn can_resolve(&self, target: &TypeInfo) -> bool;
}

/// 强类型解析扩展
#[async_trait]
pub trait ServiceResolverExt {
    /// 解析指定类型的服务
    async fn resolve<T>(&self) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static;

    /// 解析可选服务，未注册时返回 `None`
    async fn try_resolve<T>(&self) -> Result<Option<Arc<T>>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static;
}

#[async_trait]
impl<R> ServiceResolverExt for R
where
    R: ServiceResolver + ?Sized,
{
    async fn resolve<T>(&self) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let target = TypeInfo::of::<T>();
        let instance = self.resolve_instance(&target).await?;
        instance.try_downcast::<T>()
    }

    async fn try_resolve<T>(&self) -> Result<Option<Arc<T>>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let target = TypeInfo::of::<T>();
        if !self.can_resolve(&target) {
            return Ok(None);
        }
        let instance = self.resolve_instance(&target).await?;
        instance.try_downcast::<T>().map(Some)
    }
}

/// 可直接构造的服务 trait
///
/// 未指定工厂时，实现类型通过此 trait 从解析器获取依赖并完成构造。
#[async_trait]
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 使用解析器构建实例
    async fn inject(resolver: &dyn ServiceResolver) -> Result<Self, DependencyError>;
}

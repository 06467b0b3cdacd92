//! 可注入工厂抽象接口
//!
//! 描述符中的 `factory` 只是一个类型引用，扫描器通过 [`crate::InjectableCatalog`]
//! 找到对应的 [`FactoryRegistration`]，找不到即视为无效工厂。

use crate::resolver::{Instance, ServiceResolver};
use async_trait::async_trait;
use infrastructure_common::{DependencyError, TypeInfo};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 非类型化工厂 trait
///
/// 返回类型擦除的实例，由容器负责转换。
#[async_trait]
pub trait InjectableFactory: Send + Sync + 'static {
    /// 创建实例
    async fn create(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError>;

    /// 工厂产出的类型，非类型化工厂返回 `None`
    fn produces(&self) -> Option<TypeInfo> {
        None
    }
}

/// 类型化工厂 trait
///
/// 产出类型在编译期确定，通过 [`TypedFactory`] 接入扫描器。
#[async_trait]
pub trait TypedInjectableFactory<T>: Send + Sync + 'static
where
    T: ?Sized + Send + Sync + 'static,
{
    /// 创建实例
    async fn create(&self, resolver: &dyn ServiceResolver) -> Result<Arc<T>, DependencyError>;
}

/// 类型化工厂适配器
pub struct TypedFactory<F, T>
where
    T: ?Sized,
{
    factory: F,
    _product: PhantomData<fn() -> Arc<T>>,
}

impl<F, T> TypedFactory<F, T>
where
    F: TypedInjectableFactory<T>,
    T: ?Sized + Send + Sync + 'static,
{
    /// 包装类型化工厂
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            _product: PhantomData,
        }
    }
}

#[async_trait]
impl<F, T> InjectableFactory for TypedFactory<F, T>
where
    F: TypedInjectableFactory<T>,
    T: ?Sized + Send + Sync + 'static,
{
    async fn create(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        let created = TypedInjectableFactory::<T>::create(&self.factory, resolver).await?;
        Ok(Instance::new::<T>(created))
    }

    fn produces(&self) -> Option<TypeInfo> {
        Some(TypeInfo::of::<T>())
    }
}

/// 工厂注册信息
///
/// 工厂类型必须能由容器构造，这里要求实现 [`Default`]。
#[derive(Clone)]
pub struct FactoryRegistration {
    factory_type: TypeInfo,
    factory: Arc<dyn InjectableFactory>,
}

impl FactoryRegistration {
    /// 注册非类型化工厂
    pub fn untyped<F>() -> Self
    where
        F: InjectableFactory + Default,
    {
        Self {
            factory_type: TypeInfo::of::<F>(),
            factory: Arc::new(F::default()),
        }
    }

    /// 注册类型化工厂
    pub fn typed<F, T>() -> Self
    where
        F: TypedInjectableFactory<T> + Default,
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            factory_type: TypeInfo::of::<F>(),
            factory: Arc::new(TypedFactory::<F, T>::new(F::default())),
        }
    }

    /// 工厂类型
    pub fn factory_type(&self) -> &TypeInfo {
        &self.factory_type
    }

    /// 工厂产出的类型
    pub fn produces(&self) -> Option<TypeInfo> {
        self.factory.produces()
    }

    /// 生成工厂调用
    pub fn invocation(&self) -> FactoryInvocation {
        FactoryInvocation {
            factory_type: self.factory_type,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl fmt::Debug for FactoryRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistration")
            .field("factory_type", &self.factory_type.module_path)
            .field("produces", &self.produces().map(|t| t.module_path))
            .finish()
    }
}

/// 工厂调用
///
/// 交给容器的构造路径，容器在解析时调用 [`FactoryInvocation::invoke`]。
#[derive(Clone)]
pub struct FactoryInvocation {
    factory_type: TypeInfo,
    factory: Arc<dyn InjectableFactory>,
}

impl FactoryInvocation {
    /// 工厂类型
    pub fn factory_type(&self) -> &TypeInfo {
        &self.factory_type
    }

    /// 调用工厂创建实例
    pub async fn invoke(&self, resolver: &dyn ServiceResolver) -> Result<Instance, DependencyError> {
        self.factory.create(resolver).await
    }
}

impl fmt::Debug for FactoryInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryInvocation")
            .field("factory_type", &self.factory_type.module_path)
            .field("factory", &"<factory>")
            .finish()
    }
}

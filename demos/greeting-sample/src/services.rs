//! 示例服务

use async_trait::async_trait;
use di_abstractions::{ServiceResolver, TypedInjectableFactory};
use infrastructure_common::{DependencyError, TypeInfo};
use injectable_macros::{injectable, injectable_factory, Injectable};
use std::sync::Arc;
use tracing::info;

/// 问候服务
pub trait GreetingService: Send + Sync {
    fn greet(&self) -> String;
}

fn injected<T: 'static>() -> String {
    format!("{} was injected!", TypeInfo::of::<T>().short_name())
}

/// 注册到自身
#[injectable]
#[derive(Debug, Injectable)]
pub struct InjectedAsSelf;

impl GreetingService for InjectedAsSelf {
    fn greet(&self) -> String {
        injected::<Self>()
    }
}

/// 注册到问候服务接口，启动时实例化
#[injectable(target = dyn GreetingService, singleton, instantiate_on_boot, boot_priority = 10)]
#[derive(Debug, Injectable)]
pub struct InjectedAsInterface;

impl GreetingService for InjectedAsInterface {
    fn greet(&self) -> String {
        injected::<Self>()
    }
}

/// 由工厂构造的问候
#[derive(Debug)]
pub struct FactoryInjected {
    greeting: String,
}

impl FactoryInjected {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }
}

impl GreetingService for FactoryInjected {
    fn greet(&self) -> String {
        self.greeting.clone()
    }
}

#[injectable(target = FactoryInjected, factory = SampleInjectionFactory)]
#[injectable_factory(produces = FactoryInjected)]
#[derive(Debug, Default)]
pub struct SampleInjectionFactory;

#[async_trait]
impl TypedInjectableFactory<FactoryInjected> for SampleInjectionFactory {
    async fn create(
        &self,
        _resolver: &dyn ServiceResolver,
    ) -> Result<Arc<FactoryInjected>, DependencyError> {
        info!("SampleInjectionFactory 正在创建 FactoryInjected");
        Ok(Arc::new(FactoryInjected::new("I was injected via Factory!")))
    }
}

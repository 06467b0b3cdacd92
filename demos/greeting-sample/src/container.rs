//! 演示用的最小容器
//!
//! 每个目标保留最后一次注册，单例在首次解析后缓存，其余生命周期每次重新构造。

use async_trait::async_trait;
use di_abstractions::{
    Activator, Construction, FactoryInvocation, Instance, ServiceRegistrar, ServiceResolver,
};
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct DemoContainer {
    services: HashMap<TypeInfo, (Lifetime, Construction)>,
    singletons: Mutex<HashMap<TypeInfo, Instance>>,
}

impl DemoContainer {
    pub fn new() -> Self {
        Self::default()
    }

    fn cached(&self, target: &TypeInfo) -> Option<Instance> {
        self.singletons.lock().get(target).cloned()
    }

    fn cache(&self, target: TypeInfo, instance: &Instance) {
        self.singletons.lock().insert(target, instance.clone());
    }
}

#[async_trait]
impl ServiceRegistrar for DemoContainer {
    async fn register_type(
        &mut self,
        target: TypeInfo,
        _implementation: TypeInfo,
        lifetime: Lifetime,
        activator: Activator,
    ) -> Result<(), DependencyError> {
        self.services
            .insert(target, (lifetime, Construction::Direct(activator)));
        Ok(())
    }

    async fn register_factory(
        &mut self,
        target: TypeInfo,
        factory: FactoryInvocation,
        lifetime: Lifetime,
    ) -> Result<(), DependencyError> {
        self.services
            .insert(target, (lifetime, Construction::Factory(factory)));
        Ok(())
    }
}

#[async_trait]
impl ServiceResolver for DemoContainer {
    async fn resolve_instance(&self, target: &TypeInfo) -> Result<Instance, DependencyError> {
        let (lifetime, construction) = self
            .services
            .get(target)
            .ok_or_else(|| DependencyError::not_registered(target.module_path))?;

        if *lifetime == Lifetime::Singleton {
            if let Some(instance) = self.cached(target) {
                return Ok(instance);
            }
        }

        debug!("构造服务: {} ({})", target, lifetime);
        let instance = construction.construct(self).await?;
        if *lifetime == Lifetime::Singleton {
            self.cache(*target, &instance);
        }
        Ok(instance)
    }

    fn can_resolve(&self, target: &TypeInfo) -> bool {
        self.services.contains_key(target)
    }
}

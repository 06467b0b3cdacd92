//! 测试用的记录容器
//!
//! 记录所有注册，解析时同一目标以最后一次注册为准。单例和作用域服务在容器内缓存。

#![allow(dead_code)]

use async_trait::async_trait;
use di_abstractions::{
    Activator, Construction, FactoryInvocation, Instance, ServiceRegistrar, ServiceResolver,
};
use infrastructure_common::{DependencyError, Lifetime, TypeInfo};
use infrastructure_composition::ScanSettings;
use parking_lot::Mutex;
use std::collections::HashMap;

/// 一条注册记录
#[derive(Debug, Clone)]
pub struct RecordedRegistration {
    pub target: TypeInfo,
    pub implementation: TypeInfo,
    pub lifetime: Lifetime,
    pub construction: Construction,
}

impl RecordedRegistration {
    pub fn factory(&self) -> Option<TypeInfo> {
        match &self.construction {
            Construction::Direct(_) => None,
            Construction::Factory(invocation) => Some(*invocation.factory_type()),
        }
    }
}

#[derive(Default)]
pub struct RecordingContainer {
    registrations: Vec<RecordedRegistration>,
    shared: Mutex<HashMap<TypeInfo, Instance>>,
    resolved: Mutex<Vec<TypeInfo>>,
}

impl RecordingContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registrations(&self) -> &[RecordedRegistration] {
        &self.registrations
    }

    pub fn registrations_for<T: ?Sized + 'static>(&self) -> Vec<&RecordedRegistration> {
        let target = TypeInfo::of::<T>();
        self.registrations
            .iter()
            .filter(|registration| registration.target == target)
            .collect()
    }

    /// 按解析顺序记录的目标
    pub fn resolved(&self) -> Vec<TypeInfo> {
        self.resolved.lock().clone()
    }
}

#[async_trait]
impl ServiceRegistrar for RecordingContainer {
    async fn register_type(
        &mut self,
        target: TypeInfo,
        implementation: TypeInfo,
        lifetime: Lifetime,
        activator: Activator,
    ) -> Result<(), DependencyError> {
        self.registrations.push(RecordedRegistration {
            target,
            implementation,
            lifetime,
            construction: Construction::Direct(activator),
        });
        Ok(())
    }

    async fn register_factory(
        &mut self,
        target: TypeInfo,
        factory: FactoryInvocation,
        lifetime: Lifetime,
    ) -> Result<(), DependencyError> {
        self.registrations.push(RecordedRegistration {
            target,
            implementation: target,
            lifetime,
            construction: Construction::Factory(factory),
        });
        Ok(())
    }
}

#[async_trait]
impl ServiceResolver for RecordingContainer {
    async fn resolve_instance(&self, target: &TypeInfo) -> Result<Instance, DependencyError> {
        let registration = self
            .registrations
            .iter()
            .rev()
            .find(|registration| registration.target == *target)
            .ok_or_else(|| DependencyError::not_registered(target.module_path))?;

        if registration.lifetime.is_shared() {
            let cached = self.shared.lock().get(target).cloned();
            if let Some(instance) = cached {
                return Ok(instance);
            }
        }

        let instance = registration.construction.construct(self).await?;
        self.resolved.lock().push(*target);

        if registration.lifetime.is_shared() {
            self.shared.lock().insert(*target, instance.clone());
        }
        Ok(instance)
    }

    fn can_resolve(&self, target: &TypeInfo) -> bool {
        self.registrations
            .iter()
            .any(|registration| registration.target == *target)
    }
}

/// 只扫描指定模块的设置
pub fn settings_for(module_prefix: &str) -> ScanSettings {
    ScanSettings {
        module_prefixes: vec![module_prefix.to_string()],
        ..ScanSettings::default()
    }
}

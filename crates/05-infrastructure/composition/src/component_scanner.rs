//! 基于标注的可注入扫描
//!
//! 把目录中的每个描述符转换为注册请求，并在启动期完成全部配置校验

use crate::settings::ScanSettings;
use di_abstractions::{
    BootPlan, Construction, InjectableCatalog, InjectableDeclaration, InjectableScanner,
    RegistrationRequest, ScanReport,
};
use infrastructure_common::{InjectionError, Lifetime, TypeInfo};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 基于标注的扫描器
#[derive(Debug, Clone, Default)]
pub struct AttributeScanner {
    settings: ScanSettings,
}

impl AttributeScanner {
    /// 创建扫描器
    pub fn new(settings: ScanSettings) -> Self {
        Self { settings }
    }

    /// 扫描设置
    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// 声明是否在扫描范围内
    fn is_included(&self, declaration: &InjectableDeclaration) -> bool {
        self.settings.module_prefixes.is_empty()
            || self
                .settings
                .module_prefixes
                .iter()
                .any(|prefix| declaration.declared.is_in_module(prefix))
    }

    /// 从单个声明推导注册请求
    fn derive_request(
        &self,
        catalog: &InjectableCatalog,
        declaration: &InjectableDeclaration,
    ) -> Result<RegistrationRequest, InjectionError> {
        let declared = declaration.declared;
        let descriptor = &declaration.descriptor;
        let target = descriptor.resolve_target(&declared);
        let implementation = descriptor.resolve_implementation(&declared);

        let construction = match descriptor.factory {
            Some(factory_type) => {
                let registration = catalog.factory(&factory_type).ok_or_else(|| {
                    InjectionError::invalid_factory(
                        declared.module_path,
                        factory_type.module_path,
                        "类型未实现 InjectableFactory 或未注册到目录",
                    )
                })?;

                let expected = descriptor.factory_product(&declared);
                if let Some(produced) = registration.produces() {
                    if produced != expected {
                        return Err(InjectionError::invalid_factory(
                            declared.module_path,
                            factory_type.module_path,
                            format!("工厂产出 {}, 期望 {}", produced, expected),
                        ));
                    }
                }

                debug!("{} 经由工厂 {} 构造", target, factory_type);
                Construction::Factory(registration.invocation())
            }
            None => {
                let activator = declaration.activator.clone().ok_or_else(|| {
                    InjectionError::MissingActivator {
                        declared: declared.module_path.to_string(),
                        implementation: implementation.module_path.to_string(),
                    }
                })?;

                if *activator.implementation() != implementation || *activator.target() != target {
                    return Err(InjectionError::ActivatorMismatch {
                        declared: declared.module_path.to_string(),
                        expected: format!("{} -> {}", implementation, target),
                        actual: format!("{} -> {}", activator.implementation(), activator.target()),
                    });
                }

                Construction::Direct(activator)
            }
        };

        Ok(RegistrationRequest {
            declared,
            target,
            implementation,
            lifetime: descriptor.lifetime,
            sort_order: descriptor.sort_order,
            instantiate_on_boot: descriptor.instantiate_on_boot,
            boot_priority: descriptor.boot_priority(),
            construction,
        })
    }

    /// 检查同一声明上是否以不同生命周期注册到同一目标
    fn check_ambiguity(&self, requests: &[RegistrationRequest]) -> Result<(), InjectionError> {
        let mut seen: HashMap<(TypeInfo, TypeInfo), Vec<Lifetime>> = HashMap::new();
        // 保留首次出现的顺序，错误信息稳定
        let mut order: Vec<(TypeInfo, TypeInfo)> = Vec::new();

        for request in requests {
            let key = (request.declared, request.target);
            let lifetimes = seen.entry(key).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            if !lifetimes.contains(&request.lifetime) {
                lifetimes.push(request.lifetime);
            }
        }

        for key in order {
            let lifetimes = &seen[&key];
            if lifetimes.len() < 2 {
                continue;
            }
            let (declared, target) = key;
            if self.settings.fail_on_ambiguous {
                return Err(InjectionError::AmbiguousRegistration {
                    declared: declared.module_path.to_string(),
                    target: target.module_path.to_string(),
                    lifetimes: lifetimes.clone(),
                });
            }
            warn!(
                "{} 以不同生命周期多次注册到 {}: {:?}，按 sort_order 保留全部注册",
                declared, target, lifetimes
            );
        }

        Ok(())
    }
}

impl InjectableScanner for AttributeScanner {
    fn scan(&self, catalog: &InjectableCatalog) -> Result<ScanReport, InjectionError> {
        info!("开始扫描可注入声明: {} 个", catalog.len());

        let mut registrations = Vec::new();
        for declaration in catalog.declarations() {
            if !self.is_included(declaration) {
                debug!("跳过范围外的声明: {}", declaration.declared);
                continue;
            }
            let request = self.derive_request(catalog, declaration)?;
            debug!(
                "推导注册请求: {} -> {} ({}, {})",
                request.target,
                request.implementation,
                request.lifetime,
                if request.construction.is_factory() { "factory" } else { "direct" }
            );
            registrations.push(request);
        }

        self.check_ambiguity(&registrations)?;

        // 稳定排序，sort_order 相同的保持扫描顺序
        registrations.sort_by_key(|request| request.sort_order);
        let boot_plan = BootPlan::from_requests(&registrations);

        let mut warned = Vec::new();
        for entry in boot_plan.entries() {
            if boot_plan.shares_target(&entry.target) && !warned.contains(&entry.target) {
                warn!("多个实现以启动实例化注册到 {}，启动时按各自注册分别构造", entry.target);
                warned.push(entry.target);
            }
        }

        info!(
            "扫描完成: {} 个注册请求, {} 个启动实例化",
            registrations.len(),
            boot_plan.len()
        );
        Ok(ScanReport {
            registrations,
            boot_plan,
        })
    }

    fn name(&self) -> &str {
        "attribute-scanner"
    }
}

//! 注入启动器
//!
//! 协调扫描、注册和启动实例化。任何一步失败都会终止启动。

use crate::component_scanner::AttributeScanner;
use crate::settings::ScanSettings;
use di_abstractions::{
    global_catalog, BootPlan, InjectableCatalog, InjectableScanner, Instance, ScanReport,
    ServiceContainer, ServiceRegistrar, ServiceResolver,
};
use infrastructure_common::{InjectionError, InjectionResult, TypeInfo};
use tracing::{debug, error, info};

/// 启动结果
#[derive(Debug)]
pub struct BootReport {
    /// 已注册的请求数量
    pub registered: usize,
    /// 启动时实例化的目标（按实例化顺序）
    pub booted: Vec<TypeInfo>,
    /// 启动时创建的实例
    pub instances: Vec<Instance>,
}

/// 注入启动器
pub struct InjectionBootstrapper {
    settings: ScanSettings,
    catalog: InjectableCatalog,
    scanner: Box<dyn InjectableScanner>,
}

impl InjectionBootstrapper {
    /// 使用全局目录创建启动器
    pub fn new(settings: ScanSettings) -> Self {
        Self::with_catalog(settings, global_catalog())
    }

    /// 使用指定目录创建启动器
    pub fn with_catalog(settings: ScanSettings, catalog: InjectableCatalog) -> Self {
        Self {
            scanner: Box::new(AttributeScanner::new(settings.clone())),
            settings,
            catalog,
        }
    }

    /// 替换扫描器
    pub fn with_scanner(mut self, scanner: Box<dyn InjectableScanner>) -> Self {
        self.scanner = scanner;
        self
    }

    /// 扫描目录
    pub fn scan(&self) -> InjectionResult<ScanReport> {
        debug!("使用扫描器: {}", self.scanner.name());
        self.scanner.scan(&self.catalog)
    }

    /// 把所有注册请求交给容器
    pub async fn register_all<R>(
        &self,
        report: &ScanReport,
        registrar: &mut R,
    ) -> InjectionResult<usize>
    where
        R: ServiceRegistrar + ?Sized,
    {
        for request in &report.registrations {
            debug!(
                "注册服务: {} -> {} ({})",
                request.target, request.implementation, request.lifetime
            );
            registrar.register_request(request).await.map_err(|e| {
                error!("注册服务失败: {}: {}", request.target, e);
                InjectionError::from(e)
            })?;
        }

        info!("注册完成: {} 个服务", report.registrations.len());
        Ok(report.registrations.len())
    }

    /// 按计划提前实例化
    ///
    /// 目标只对应一个条目时经由解析器解析，由容器负责缓存；多个条目共用同一目标时，
    /// 容器只会返回其中一个注册，此时按各条目自身的构造方式创建实例。
    pub async fn instantiate_on_boot<R>(
        &self,
        plan: &BootPlan,
        resolver: &R,
    ) -> InjectionResult<Vec<Instance>>
    where
        R: ServiceResolver,
    {
        let mut instances = Vec::with_capacity(plan.len());
        for (entry, construction) in plan.steps() {
            debug!(
                "启动实例化: {} -> {} (priority={}, sort_order={})",
                entry.target, entry.implementation, entry.boot_priority, entry.sort_order
            );
            let created = if plan.shares_target(&entry.target) {
                construction.construct(resolver).await
            } else {
                resolver.resolve_instance(&entry.target).await
            };
            let instance = created.map_err(|e| {
                error!("启动实例化失败: {}: {}", entry.target, e);
                InjectionError::BootInstantiation {
                    target: entry.target.module_path.to_string(),
                    source: e,
                }
            })?;
            instances.push(instance);
        }

        info!("启动实例化完成: {} 个服务", instances.len());
        Ok(instances)
    }

    /// 扫描、注册并执行启动实例化
    pub async fn bootstrap<C>(&self, container: &mut C) -> InjectionResult<BootReport>
    where
        C: ServiceContainer,
    {
        info!("开始注入启动");

        let report = self.scan()?;
        let registered = self.register_all(&report, container).await?;

        let instances = if self.settings.boot_enabled {
            self.instantiate_on_boot(&report.boot_plan, &*container).await?
        } else {
            info!("启动实例化已禁用，跳过 {} 个服务", report.boot_plan.len());
            Vec::new()
        };

        let booted = if self.settings.boot_enabled {
            report
                .boot_plan
                .entries()
                .iter()
                .map(|entry| entry.target)
                .collect()
        } else {
            Vec::new()
        };

        info!("注入启动完成");
        Ok(BootReport {
            registered,
            booted,
            instances,
        })
    }
}

//! 可注入扫描器抽象接口
//!
//! 扫描器把目录中的声明转换为注册请求和启动实例化计划

use crate::discovery::InjectableCatalog;
use crate::registry::{Construction, RegistrationRequest, RegistrationSummary};
use infrastructure_common::{InjectionError, TypeInfo};
use serde::Serialize;

/// 可注入扫描器 trait
pub trait InjectableScanner: Send + Sync {
    /// 扫描目录
    fn scan(&self, catalog: &InjectableCatalog) -> Result<ScanReport, InjectionError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}

/// 启动实例化条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BootEntry {
    /// 需要提前解析的目标
    pub target: TypeInfo,
    /// 实现类型
    pub implementation: TypeInfo,
    /// 被标注的类型
    pub declared: TypeInfo,
    /// 启动优先级
    pub boot_priority: u8,
    /// 排序提示
    pub sort_order: i32,
}

/// 启动实例化计划
///
/// 按启动优先级升序排列，优先级相同时保持扫描顺序。每个条目保留其注册的构造方式，
/// 多个条目共用同一目标时可以分别构造。
#[derive(Debug, Clone, Default, Serialize)]
pub struct BootPlan {
    entries: Vec<BootEntry>,
    #[serde(skip_serializing)]
    constructions: Vec<Construction>,
}

impl BootPlan {
    /// 从注册请求生成计划
    pub fn from_requests(requests: &[RegistrationRequest]) -> Self {
        let mut steps: Vec<(BootEntry, Construction)> = requests
            .iter()
            .filter(|request| request.instantiate_on_boot)
            .map(|request| {
                let entry = BootEntry {
                    target: request.target,
                    implementation: request.implementation,
                    declared: request.declared,
                    boot_priority: request.boot_priority,
                    sort_order: request.sort_order,
                };
                (entry, request.construction.clone())
            })
            .collect();
        // sort_by_key 是稳定排序
        steps.sort_by_key(|(entry, _)| (entry.boot_priority, entry.sort_order));

        let (entries, constructions) = steps.into_iter().unzip();
        Self {
            entries,
            constructions,
        }
    }

    /// 计划中的条目
    pub fn entries(&self) -> &[BootEntry] {
        &self.entries
    }

    /// 条目及其构造方式
    pub fn steps(&self) -> impl Iterator<Item = (&BootEntry, &Construction)> {
        self.entries.iter().zip(self.constructions.iter())
    }

    /// 目标是否被多个条目共用
    pub fn shares_target(&self, target: &TypeInfo) -> bool {
        self.entries
            .iter()
            .filter(|entry| entry.target == *target)
            .nth(1)
            .is_some()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 扫描结果
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// 注册请求（按排序提示排列）
    pub registrations: Vec<RegistrationRequest>,
    /// 启动实例化计划
    pub boot_plan: BootPlan,
}

impl ScanReport {
    /// 指定目标的注册请求
    pub fn registrations_for(&self, target: &TypeInfo) -> Vec<&RegistrationRequest> {
        self.registrations
            .iter()
            .filter(|request| request.target == *target)
            .collect()
    }

    /// 生成可序列化的摘要
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            registrations: self
                .registrations
                .iter()
                .map(RegistrationRequest::summary)
                .collect(),
            boot_order: self
                .boot_plan
                .entries()
                .iter()
                .map(|entry| entry.target.module_path)
                .collect(),
        }
    }
}

/// 扫描结果摘要
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub registrations: Vec<RegistrationSummary>,
    pub boot_order: Vec<&'static str>,
}

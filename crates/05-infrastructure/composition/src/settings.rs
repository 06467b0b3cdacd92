//! 注入配置
//!
//! 配置来源依次为 `config/injection.*`（可选）、显式指定的文件和 `INJECTION_*` 环境变量，
//! 后加载的覆盖先加载的。环境变量形如 `INJECTION_SCAN__BOOT_ENABLED=false`。

use infrastructure_common::{InjectionError, InjectionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// 扫描设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// 同一声明以不同生命周期注册到同一目标时是否终止启动
    pub fail_on_ambiguous: bool,
    /// 是否执行启动实例化
    pub boot_enabled: bool,
    /// 扫描范围（类型路径前缀），为空时扫描全部声明
    pub module_prefixes: Vec<String>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            fail_on_ambiguous: true,
            boot_enabled: true,
            module_prefixes: Vec::new(),
        }
    }
}

/// 日志设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 日志过滤表达式，`RUST_LOG` 优先
    pub filter: String,
    /// 是否输出 JSON 格式
    pub json_format: bool,
    /// 是否显示目标模块
    pub show_target: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json_format: false,
            show_target: true,
        }
    }
}

impl LoggingSettings {
    /// 初始化日志系统
    ///
    /// 全局 subscriber 已经存在时返回错误。
    pub fn initialize(&self) -> InjectionResult<()> {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(&self.filter))
            .map_err(|e| InjectionError::settings(format!("日志过滤表达式无效: {}", e)))?;

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.show_target);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InjectionError::settings(format!("日志初始化失败: {}", e)))?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

/// 注入设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionSettings {
    /// 扫描设置
    pub scan: ScanSettings,
    /// 日志设置
    pub logging: LoggingSettings,
}

impl InjectionSettings {
    /// 环境变量前缀
    pub const ENV_PREFIX: &'static str = "INJECTION";

    /// 加载配置
    pub fn load(path: Option<&Path>) -> InjectionResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/injection").required(false));

        if let Some(path) = path {
            debug!("加载注入配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scan.module_prefixes")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| InjectionError::settings(format!("配置构建失败: {}", e)))?;

        let loaded: Self = settings
            .try_deserialize()
            .map_err(|e| InjectionError::settings(format!("配置绑定失败: {}", e)))?;

        debug!("注入配置: {:?}", loaded);
        Ok(loaded)
    }
}

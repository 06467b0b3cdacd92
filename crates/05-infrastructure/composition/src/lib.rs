//! # 注入组合层
//!
//! 负责把可注入声明组合成容器注册：扫描描述符、校验配置、交付注册请求，
//! 并按启动优先级提前实例化服务。
//!
//! ## 主要功能
//!
//! - **标注扫描**: [`AttributeScanner`] 从描述符推导注册请求和启动计划
//! - **启动协调**: [`InjectionBootstrapper`] 完成扫描、注册和启动实例化
//! - **配置管理**: [`InjectionSettings`] 从文件和环境变量加载设置
//!
//! ## 基本使用
//!
//! ```rust,ignore
//! use infrastructure_composition::{InjectionBootstrapper, InjectionSettings};
//!
//! let settings = InjectionSettings::load(None)?;
//! settings.logging.initialize()?;
//!
//! let bootstrapper = InjectionBootstrapper::new(settings.scan);
//! let report = bootstrapper.bootstrap(&mut container).await?;
//! println!("注册了 {} 个服务", report.registered);
//! ```

pub mod bootstrapper;
pub mod component_scanner;
pub mod settings;

pub use bootstrapper::{BootReport, InjectionBootstrapper};
pub use component_scanner::AttributeScanner;
pub use settings::{InjectionSettings, LoggingSettings, ScanSettings};

pub use infrastructure_common::InjectionError;

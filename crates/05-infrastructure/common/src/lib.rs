//! # Infrastructure Common
//!
//! 这个 crate 提供了可注入服务声明的公共数据模型。
//!
//! ## 核心类型
//!
//! - [`InjectableDescriptor`] - 可注入描述符，声明一次期望的服务注册
//! - [`Lifetime`] - 服务生命周期
//! - [`TypeInfo`] - 类型引用
//! - [`DependencyError`] / [`InjectionError`] - 解析错误与启动期配置错误
//!
//! ## 设计原则
//!
//! - 描述符是纯数据，不包含任何行为
//! - 所有解释工作都在外部扫描器和容器中完成
//! - 描述符本身不做任何校验

pub mod errors;
pub mod injectable;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use injectable::*;
pub use lifecycle::*;
pub use metadata::*;

//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义可注入声明被扫描、注册和构造时所依赖的能力。
//!
//! ## 核心接口
//!
//! - [`ServiceResolver`] - 服务解析器接口，传入工厂和直接构造
//! - [`InjectableFactory`] / [`TypedInjectableFactory`] - 可注入工厂接口
//! - [`ServiceRegistrar`] - 容器注册接口
//! - [`InjectableScanner`] - 可注入扫描器接口
//! - [`InjectableCatalog`] - 以类型标识为键的声明目录

pub mod container;
pub mod discovery;
pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use container::*;
pub use discovery::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;

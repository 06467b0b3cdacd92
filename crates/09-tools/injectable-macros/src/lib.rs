//! # Injectable Macros
//!
//! 这个 crate 提供了把类型声明为可注入服务的过程宏。
//!
//! ## 核心宏
//!
//! - [`injectable`] - 附加可注入描述符，可以重复使用
//! - [`injectable_factory`] - 把类型注册为可注入工厂
//! - [`Injectable`](derive@Injectable) - 从解析器构造实例
//!
//! 生成的代码引用 `infrastructure_common`、`di_abstractions`、`async_trait` 和 `ctor`，
//! 使用方需要依赖这些 crate。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use injectable_macros::{injectable, injectable_factory, Injectable};
//!
//! pub trait GreetingService: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[injectable]
//! #[injectable(target = dyn GreetingService, singleton)]
//! #[derive(Debug, Default, Injectable)]
//! pub struct InjectedAsSelf;
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod derive;
mod factory;
mod injectable;
mod utils;

/// 可注入描述符宏
///
/// 在进程启动时把一个可注入声明写入全局目录。可以在同一类型上重复使用，每次产生一个独立的注册。
///
/// # 参数
///
/// - `target = Type` - 注册目标，默认为被标注的类型
/// - `implementation = Type` - 实现类型，默认为被标注的类型
/// - `singleton` / `scoped` / `transient` 或 `lifetime = scoped` - 生命周期（默认 scoped）
/// - `instantiate_on_boot` 或 `instantiate_on_boot = true` - 启动时实例化
/// - `boot_priority = N` - 启动优先级 0..=255（默认 255）
/// - `sort_order = N` - 排序提示（默认 0）
/// - `factory = Type` - 经由工厂构造
///
/// # 示例
///
/// ```rust,ignore
/// #[injectable(target = dyn GreetingService, instantiate_on_boot, boot_priority = 10)]
/// #[derive(Debug, Default, Injectable)]
/// pub struct InjectedAsInterface;
/// ```
#[proc_macro_attribute]
pub fn injectable(args: TokenStream, input: TokenStream) -> TokenStream {
    injectable::injectable_impl(args, input)
}

/// 可注入工厂宏
///
/// 把类型注册到全局目录的工厂表中。类型必须实现 `Default`。
///
/// # 参数
///
/// - 无参数 - 非类型化工厂，类型需实现 `InjectableFactory`
/// - `produces = Type` - 类型化工厂，类型需实现 `TypedInjectableFactory<Type>`
///
/// # 示例
///
/// ```rust,ignore
/// #[injectable(target = FactoryInjected, factory = SampleInjectionFactory)]
/// #[injectable_factory(produces = FactoryInjected)]
/// #[derive(Default)]
/// pub struct SampleInjectionFactory;
/// ```
#[proc_macro_attribute]
pub fn injectable_factory(args: TokenStream, input: TokenStream) -> TokenStream {
    factory::injectable_factory_impl(args, input)
}

/// 可注入派生宏
///
/// `Arc<T>` 字段从解析器获取，`Option<Arc<T>>` 字段在未注册时为 `None`，其余字段使用 `Default`。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// pub struct Greeter {
///     clock: Arc<dyn Clock>,
///     audit: Option<Arc<AuditLog>>,
///     calls: AtomicUsize,
/// }
/// ```
#[proc_macro_derive(Injectable)]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::derive_injectable_impl(input)
}

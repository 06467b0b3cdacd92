//! # 问候示例
//!
//! 扫描 `#[injectable]` 声明，注册到演示容器并解析问候服务

mod container;
mod services;

use clap::Parser;
use container::DemoContainer;
use di_abstractions::ServiceResolverExt;
use infrastructure_composition::{InjectionBootstrapper, InjectionSettings};
use services::{FactoryInjected, GreetingService, InjectedAsSelf};
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "greeting-sample")]
#[command(about = "可注入服务注册示例")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志过滤表达式，覆盖配置文件
    #[arg(long)]
    log_level: Option<String>,

    /// 输出 JSON 格式日志
    #[arg(long)]
    json: bool,

    /// 只打印扫描摘要，不注册
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = InjectionSettings::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        settings.logging.filter = level;
    }
    if args.json {
        settings.logging.json_format = true;
    }
    settings.logging.initialize()?;

    // 只扫描本示例声明的服务
    if settings.scan.module_prefixes.is_empty() {
        settings
            .scan
            .module_prefixes
            .push(env!("CARGO_CRATE_NAME").to_string());
    }

    info!("启动问候示例");
    let bootstrapper = InjectionBootstrapper::new(settings.scan.clone());

    let report = bootstrapper.scan()?;
    println!("{}", serde_json::to_string_pretty(&report.summary())?);
    if args.dry_run {
        return Ok(());
    }

    let mut container = DemoContainer::new();
    let registered = bootstrapper.register_all(&report, &mut container).await?;
    let booted = if settings.scan.boot_enabled {
        bootstrapper
            .instantiate_on_boot(&report.boot_plan, &container)
            .await?
    } else {
        Vec::new()
    };
    info!("注册 {} 个服务，启动实例化 {} 个", registered, booted.len());

    let own = container.resolve::<InjectedAsSelf>().await?;
    let interface = container.resolve::<dyn GreetingService>().await?;
    let factory = container.resolve::<FactoryInjected>().await?;

    for greeting in [own.greet(), interface.greet(), factory.greet()] {
        println!("{greeting}");
    }

    Ok(())
}

//! # 示例应用程序
//!
//! 用一个小型太阳系演示 Bean 容器：声明配置源、构建容器、按名称查找 Bean

mod beans;
mod domain;

use anyhow::Context;
use beans::HardBeansConfig;
use clap::Parser;
use di_abstractions::ContainerConfig;
use di_impl::{BeanContainer, BeanFactory};
use domain::{Planet, Star, StarSystem};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn Beans 示例应用")]
struct Args {
    /// 容器配置文件路径 (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 输出构建统计
    #[arg(long)]
    stats: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动 Lorn Beans 示例应用");

    let container = match build_container(&args) {
        Ok(container) => container,
        Err(e) => {
            error!("容器构建失败: {:#}", e);
            return Err(e);
        }
    };

    demonstrate_lookup(&container)?;

    if args.stats {
        println!("{}", serde_json::to_string_pretty(container.stats())?);
    }

    info!("应用已结束");
    Ok(())
}

/// 构建容器
fn build_container(args: &Args) -> anyhow::Result<BeanContainer> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ContainerConfig::default(),
    };

    let container = BeanContainer::builder()
        .with_config(config)
        .add_configuration::<HardBeansConfig>()
        .build()
        .context("无法构建 Bean 容器")?;

    info!("容器 {} 构建完成", container.id());
    Ok(container)
}

fn load_config(path: &Path) -> anyhow::Result<ContainerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("配置文件格式错误 {}", path.display()))
}

/// 演示按名称查找
fn demonstrate_lookup(container: &BeanContainer) -> anyhow::Result<()> {
    info!("已注册的 Bean: {}", container.bean_names().join(", "));

    let sun = container.get_bean_as::<Star>("Sun")?;
    println!("Sun: {}", sun.name);

    for name in ["Earth", "Mars"] {
        let planet = container.get_bean_as::<Planet>(name)?;
        println!("{}: {}", name, planet.name);
    }

    for name in ["Ssys", "Ssys2", "Ssys3"] {
        let system = container.get_bean_as::<StarSystem>(name)?;
        println!("{}: {}", name, system);
    }

    Ok(())
}

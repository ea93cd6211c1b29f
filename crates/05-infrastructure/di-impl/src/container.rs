//! Bean 容器实现

use crate::engine::{BeanGraph, Resolver};
use di_abstractions::{
    BeanFactory, ConfigSource, Configuration, ContainerConfig, ContainerStats, DefinitionRegistry,
    ResolveContext,
};
use infrastructure_common::{BeanInstance, DependencyError, DependencyResult};
use tracing::{info, trace};
use uuid::Uuid;

/// Bean 容器
///
/// 构建完成后不可变。单例查找返回同一实例，原型查找每次创建新实例，
/// 因此可以在多个线程间共享。
#[derive(Debug)]
pub struct BeanContainer {
    id: Uuid,
    config: ContainerConfig,
    graph: BeanGraph,
    stats: ContainerStats,
}

impl BeanContainer {
    /// 创建容器构建器
    pub fn builder() -> BeanContainerBuilder {
        BeanContainerBuilder::new()
    }

    /// 使用默认配置从配置源构建容器
    pub fn from_sources(sources: impl IntoIterator<Item = ConfigSource>) -> DependencyResult<Self> {
        sources
            .into_iter()
            .fold(Self::builder(), BeanContainerBuilder::add_source)
            .build()
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 构建统计
    pub fn stats(&self) -> &ContainerStats {
        &self.stats
    }
}

impl BeanFactory for BeanContainer {
    fn get_bean(&self, name: &str) -> DependencyResult<BeanInstance> {
        if let Some(bean) = self.graph.singletons.get(name) {
            return Ok(bean.clone());
        }
        match self.graph.prototypes.get(name) {
            Some(definition) => {
                trace!("创建原型实例: {} <- {}", name, definition);
                self.graph.materialize(definition, &mut ResolveContext::new())
            }
            None => Err(DependencyError::unknown_bean(name)),
        }
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.graph.contains(name)
    }

    fn is_prototype(&self, name: &str) -> DependencyResult<bool> {
        if self.graph.prototypes.contains(name) {
            Ok(true)
        } else if self.graph.singletons.contains(name) {
            Ok(false)
        } else {
            Err(DependencyError::unknown_bean(name))
        }
    }

    fn bean_names(&self) -> Vec<String> {
        self.graph
            .singletons
            .names()
            .chain(self.graph.prototypes.names())
            .map(str::to_string)
            .collect()
    }
}

/// 容器构建器
#[derive(Debug, Default)]
pub struct BeanContainerBuilder {
    config: ContainerConfig,
    registry: DefinitionRegistry,
}

impl BeanContainerBuilder {
    /// 创建使用默认配置的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 添加配置类型
    pub fn add_configuration<C: Configuration>(self) -> Self {
        self.add_source(ConfigSource::of::<C>())
    }

    /// 添加已提取声明的配置源
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.registry.load(source);
        self
    }

    /// 解析全部定义并构建容器
    ///
    /// 任何配置错误都会使整个构建失败，不会返回部分构建的容器。
    pub fn build(self) -> DependencyResult<BeanContainer> {
        let id = Uuid::new_v4();
        let definitions = self.registry.len();
        info!("开始构建容器 {}: {} 个 Bean 定义", id, definitions);

        let pending = self.registry.into_pending(self.config.sort_by_parameter_count);
        let resolution = Resolver::new(&self.config, pending).run()?;

        let stats = ContainerStats {
            definitions,
            singletons: resolution.graph.singletons.len(),
            prototypes: resolution.graph.prototypes.len(),
            passes: resolution.passes,
        };
        info!(
            "构建容器完成 {}: {} 个单例, {} 个原型, {} 轮解析",
            id, stats.singletons, stats.prototypes, stats.passes
        );

        Ok(BeanContainer {
            id,
            config: self.config,
            graph: resolution.graph,
            stats,
        })
    }
}

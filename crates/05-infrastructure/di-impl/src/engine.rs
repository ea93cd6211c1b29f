//! 不动点解析引擎
//!
//! 反复扫描待解析定义：参数全部可满足的定义立即构造，其余留到下一轮。
//! 一轮扫描没有任何进展时结束；此时仍有待解析定义即为解析失败。

use crate::aggregate;
use crate::diagnostics;
use crate::store::{PrototypeTable, SingletonStore};
use di_abstractions::{BeanDefinition, ContainerConfig, DefinitionId, ResolveContext};
use infrastructure_common::{
    Argument, BeanInstance, DependencyError, DependencyResult, Lifetime, TypeDescriptor, TypeInfo,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// 已解析的 Bean 图
#[derive(Debug, Default)]
pub(crate) struct BeanGraph {
    pub(crate) singletons: SingletonStore,
    pub(crate) prototypes: PrototypeTable,
}

impl BeanGraph {
    /// 名称是否已被单例或原型占用
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.singletons.contains(name) || self.prototypes.contains(name)
    }

    /// 是否存在指定类型的来源
    pub(crate) fn has_source(&self, type_info: &TypeInfo) -> bool {
        self.singletons.has_type(type_info) || self.prototypes.has_type(type_info)
    }

    /// 以 `prefix` 开头的已占用名称数量
    pub(crate) fn count_with_prefix(&self, prefix: &str) -> usize {
        self.singletons
            .names()
            .chain(self.prototypes.names())
            .filter(|name| name.starts_with(prefix))
            .count()
    }

    /// 调用定义的工厂创建实例
    ///
    /// 原型之间的相互引用会在 `context` 中形成重复项，此时返回循环依赖错误。
    pub(crate) fn materialize(
        &self,
        definition: &BeanDefinition,
        context: &mut ResolveContext,
    ) -> DependencyResult<BeanInstance> {
        context.push(definition.id(), definition.to_string())?;
        trace!("实例化 {} (深度 {})", definition, context.depth());
        let result = self.invoke(definition, context);
        context.pop();
        result
    }

    fn invoke(
        &self,
        definition: &BeanDefinition,
        context: &mut ResolveContext,
    ) -> DependencyResult<BeanInstance> {
        let receiver = definition.receiver().instantiate(definition)?;
        let arguments = self.resolve_arguments(definition, context)?;
        definition.invoke(receiver.as_ref(), arguments)
    }

    /// 检查原型定义能否在查找时完成构造，不调用任何工厂
    ///
    /// 精确类型参数必须恰好有一个候选，聚合参数的集合形态必须受支持。
    pub(crate) fn validate(&self, definition: &BeanDefinition) -> DependencyResult<()> {
        definition.receiver().instantiate(definition)?;
        for parameter in definition.parameters() {
            match parameter {
                TypeDescriptor::Exact(type_info) => {
                    let (singletons, prototypes) = self.candidates(definition, type_info);
                    if singletons.len() + prototypes.len() > 1 {
                        return Err(ambiguous(definition, parameter, &singletons, &prototypes));
                    }
                    if singletons.is_empty() && prototypes.is_empty() {
                        return Err(DependencyError::NoMatchingBean {
                            definition: definition.to_string(),
                            parameter: parameter.to_string(),
                        });
                    }
                }
                _ => {
                    aggregate::layout(definition, parameter)?;
                }
            }
        }
        Ok(())
    }

    /// 精确类型的候选：单例按创建顺序，其他原型按发现顺序
    fn candidates<'g>(
        &'g self,
        definition: &BeanDefinition,
        type_info: &TypeInfo,
    ) -> (
        Vec<(&'g str, &'g BeanInstance)>,
        Vec<(&'g str, &'g Arc<BeanDefinition>)>,
    ) {
        (
            self.singletons.of_type(type_info).collect(),
            self.prototypes.producing(type_info, Some(definition.id())),
        )
    }

    /// 按声明顺序解析全部参数
    pub(crate) fn resolve_arguments(
        &self,
        definition: &BeanDefinition,
        context: &mut ResolveContext,
    ) -> DependencyResult<Vec<Argument>> {
        let mut arguments = Vec::with_capacity(definition.parameter_count());
        for parameter in definition.parameters() {
            arguments.push(self.resolve_argument(definition, parameter, context)?);
        }
        Ok(arguments)
    }

    fn resolve_argument(
        &self,
        definition: &BeanDefinition,
        parameter: &TypeDescriptor,
        context: &mut ResolveContext,
    ) -> DependencyResult<Argument> {
        if let TypeDescriptor::Exact(type_info) = parameter {
            if let Some(bean) = self.resolve_single(definition, parameter, type_info, context)? {
                return Ok(Argument::Single(bean));
            }
        }
        aggregate::build(self, definition, parameter, context)
    }

    /// 精确类型匹配：恰好一个候选时返回实例，多个候选报歧义，没有候选返回 `None`
    fn resolve_single(
        &self,
        definition: &BeanDefinition,
        parameter: &TypeDescriptor,
        type_info: &TypeInfo,
        context: &mut ResolveContext,
    ) -> DependencyResult<Option<BeanInstance>> {
        let (singletons, prototypes) = self.candidates(definition, type_info);

        match (singletons.as_slice(), prototypes.as_slice()) {
            ([], []) => Ok(None),
            ([(_, bean)], []) => Ok(Some((*bean).clone())),
            ([], [(name, prototype)]) => {
                trace!("为 {} 创建原型 {}", definition, name);
                self.materialize(prototype, context).map(Some)
            }
            _ => Err(ambiguous(definition, parameter, &singletons, &prototypes)),
        }
    }
}

fn ambiguous(
    definition: &BeanDefinition,
    parameter: &TypeDescriptor,
    singletons: &[(&str, &BeanInstance)],
    prototypes: &[(&str, &Arc<BeanDefinition>)],
) -> DependencyError {
    DependencyError::AmbiguousBean {
        definition: definition.to_string(),
        parameter: parameter.to_string(),
        candidates: singletons
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(prototypes.iter().map(|(name, _)| name.to_string()))
            .collect(),
    }
}

/// 解析完成后的结果
#[derive(Debug)]
pub(crate) struct Resolution {
    pub(crate) graph: BeanGraph,
    pub(crate) passes: usize,
}

/// 不动点调度器
pub(crate) struct Resolver<'a> {
    config: &'a ContainerConfig,
    graph: BeanGraph,
    pending: Vec<Arc<BeanDefinition>>,
    passes: usize,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(config: &'a ContainerConfig, pending: Vec<Arc<BeanDefinition>>) -> Self {
        Self {
            config,
            graph: BeanGraph::default(),
            pending,
            passes: 0,
        }
    }

    /// 运行到不动点
    pub(crate) fn run(mut self) -> DependencyResult<Resolution> {
        loop {
            self.passes += 1;
            let constructed = self.pass()?;
            debug!(
                "第 {} 轮解析: 构造 {} 个, 剩余 {} 个",
                self.passes,
                constructed,
                self.pending.len()
            );
            if constructed == 0 {
                break;
            }
        }

        if !self.pending.is_empty() {
            return Err(self.unsatisfiable());
        }

        Ok(Resolution {
            graph: self.graph,
            passes: self.passes,
        })
    }

    /// 单轮扫描，返回本轮构造的定义数量
    ///
    /// 本轮构造出的 Bean 对同一轮中后续的定义立即可见。
    fn pass(&mut self) -> DependencyResult<usize> {
        let mut constructed = 0;
        let mut index = 0;
        while index < self.pending.len() {
            if self.is_resolvable(&self.pending[index]) {
                let definition = self.pending.remove(index);
                self.construct(&definition)?;
                constructed += 1;
            } else {
                index += 1;
            }
        }
        Ok(constructed)
    }

    fn is_resolvable(&self, definition: &BeanDefinition) -> bool {
        definition
            .parameters()
            .iter()
            .all(|parameter| self.is_satisfiable(definition, parameter))
    }

    /// 参数是否可满足
    ///
    /// 精确类型需要至少一个来源。聚合参数在已有来源，或者其他待解析定义都不会产出该元素类型时可满足，
    /// 因此空聚合也能被注入。
    fn is_satisfiable(&self, definition: &BeanDefinition, parameter: &TypeDescriptor) -> bool {
        let component = parameter.component();
        if self.graph.has_source(component) {
            return true;
        }
        parameter.is_aggregate() && !self.pending_produces(component, definition.id())
    }

    fn pending_produces(&self, type_info: &TypeInfo, exclude: DefinitionId) -> bool {
        self.pending
            .iter()
            .any(|other| other.id() != exclude && other.return_type().id == type_info.id)
    }

    fn construct(&mut self, definition: &Arc<BeanDefinition>) -> DependencyResult<()> {
        let name = self.assign_name(definition);
        if self.graph.contains(&name) {
            warn!("Bean 名称重复: {} ({})", name, definition);
            return Err(DependencyError::DuplicateBeanName { name });
        }

        match definition.lifetime() {
            Lifetime::Singleton => {
                let bean = self.graph.materialize(definition, &mut ResolveContext::new())?;
                debug!("创建单例: {} <- {}", name, definition);
                self.graph.singletons.insert(name, bean)
            }
            Lifetime::Prototype => {
                self.graph.validate(definition)?;
                debug!("登记原型: {} <- {}", name, definition);
                self.graph.prototypes.insert(name, definition.clone())
            }
        }
    }

    /// 显式名称优先，否则为 `标识符 + 分隔符 + 序号`
    fn assign_name(&self, definition: &BeanDefinition) -> String {
        if let Some(name) = definition.explicit_name() {
            return name.to_string();
        }
        let prefix = format!("{}{}", definition.identifier(), self.config.name_separator);
        let ordinal = self.graph.count_with_prefix(&prefix);
        format!("{prefix}{ordinal}")
    }

    fn unsatisfiable(&self) -> DependencyError {
        let pending: Vec<String> = self.pending.iter().map(ToString::to_string).collect();
        let (definition, missing) = match self.pending.first() {
            Some(first) => (
                first.to_string(),
                first
                    .parameters()
                    .iter()
                    .find(|parameter| !self.is_satisfiable(first, parameter))
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            None => (String::new(), String::new()),
        };
        let cycle = if self.config.diagnose_cycles {
            diagnostics::find_cycle(&self.pending)
        } else {
            None
        };

        warn!(
            "无法满足的依赖: {} 缺少 {}, 剩余 {} 个待解析定义",
            definition,
            missing,
            pending.len()
        );
        DependencyError::UnsatisfiableDependency {
            definition,
            missing,
            pending,
            cycle,
        }
    }
}

//! 聚合参数构造
//!
//! 数组、列表、队列、集合参数收集元素类型的全部来源：先是单例（按创建顺序），
//! 再是其他原型定义当场创建的新实例（按发现顺序）。

use crate::engine::BeanGraph;
use di_abstractions::{BeanDefinition, ResolveContext};
use infrastructure_common::{
    Argument, BeanInstance, CollectionKind, DependencyError, DependencyResult, TypeDescriptor,
    TypeInfo,
};
use tracing::trace;

/// 为聚合参数构造实参
///
/// 精确类型参数走到这里说明没有任何候选，返回 [`DependencyError::NoMatchingBean`]。
pub(crate) fn build(
    graph: &BeanGraph,
    definition: &BeanDefinition,
    parameter: &TypeDescriptor,
    context: &mut ResolveContext,
) -> DependencyResult<Argument> {
    let (component, distinct) = layout(definition, parameter)?;
    let mut items = collect(graph, definition, component, context)?;
    if distinct {
        dedup_by_identity(&mut items);
    }
    trace!("聚合参数 {} 收集到 {} 个元素", parameter, items.len());
    Ok(Argument::Many(items))
}

/// 聚合参数的元素类型，以及是否需要去重
pub(crate) fn layout<'p>(
    definition: &BeanDefinition,
    parameter: &'p TypeDescriptor,
) -> DependencyResult<(&'p TypeInfo, bool)> {
    match parameter {
        TypeDescriptor::Exact(_) => Err(DependencyError::NoMatchingBean {
            definition: definition.to_string(),
            parameter: parameter.to_string(),
        }),
        TypeDescriptor::Array(component) => Ok((component, false)),
        TypeDescriptor::Collection(kind, component) => match kind {
            CollectionKind::List | CollectionKind::Queue => Ok((component, false)),
            CollectionKind::Set => Ok((component, true)),
            CollectionKind::Other(shape) => Err(DependencyError::UnsupportedComposite {
                definition: definition.to_string(),
                parameter: parameter.to_string(),
                shape: shape.clone(),
            }),
        },
    }
}

fn collect(
    graph: &BeanGraph,
    definition: &BeanDefinition,
    component: &TypeInfo,
    context: &mut ResolveContext,
) -> DependencyResult<Vec<BeanInstance>> {
    let mut items: Vec<BeanInstance> = graph
        .singletons
        .of_type(component)
        .map(|(_, bean)| bean.clone())
        .collect();

    for (_, prototype) in graph.prototypes.producing(component, Some(definition.id())) {
        items.push(graph.materialize(prototype, context)?);
    }
    Ok(items)
}

// 同一实例只保留第一次出现的位置
fn dedup_by_identity(items: &mut Vec<BeanInstance>) {
    let mut kept: Vec<BeanInstance> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if !kept.iter().any(|existing| existing.ptr_eq(&item)) {
            kept.push(item);
        }
    }
    *items = kept;
}

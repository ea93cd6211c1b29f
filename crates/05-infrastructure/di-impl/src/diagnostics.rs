//! 解析失败诊断
//!
//! 在待解析定义之间建立依赖边，用深度优先搜索找出第一个循环。

use di_abstractions::BeanDefinition;
use infrastructure_common::TypeDescriptor;
use std::collections::HashSet;
use std::sync::Arc;

/// 查找待解析定义之间的循环，返回形如 `a -> b -> a` 的依赖链
///
/// `A` 的某个参数元素类型由待解析的 `B` 产出时存在边 `A -> B`。
/// 聚合参数不会等待自身，因此聚合参数上的自环不算。
pub(crate) fn find_cycle(pending: &[Arc<BeanDefinition>]) -> Option<String> {
    let edges: Vec<Vec<usize>> = pending
        .iter()
        .enumerate()
        .map(|(from, definition)| dependencies(pending, from, definition))
        .collect();

    let mut visited = HashSet::new();
    let mut path = Vec::new();
    for start in 0..pending.len() {
        if visited.contains(&start) {
            continue;
        }
        if let Some(cycle) = dfs_check(start, &edges, &mut visited, &mut path) {
            return Some(
                cycle
                    .iter()
                    .map(|&index| pending[index].to_string())
                    .collect::<Vec<_>>()
                    .join(" -> "),
            );
        }
    }
    None
}

fn dependencies(
    pending: &[Arc<BeanDefinition>],
    from: usize,
    definition: &BeanDefinition,
) -> Vec<usize> {
    let mut targets = Vec::new();
    for parameter in definition.parameters() {
        let component = parameter.component();
        for (to, other) in pending.iter().enumerate() {
            let self_aggregate = to == from && !matches!(parameter, TypeDescriptor::Exact(_));
            if other.return_type().id == component.id && !self_aggregate && !targets.contains(&to) {
                targets.push(to);
            }
        }
    }
    targets
}

fn dfs_check(
    current: usize,
    edges: &[Vec<usize>],
    visited: &mut HashSet<usize>,
    path: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    if let Some(position) = path.iter().position(|&index| index == current) {
        // 检测到循环
        let mut cycle = path[position..].to_vec();
        cycle.push(current);
        return Some(cycle);
    }

    if visited.contains(&current) {
        return None;
    }

    path.push(current);
    for &next in &edges[current] {
        if let Some(cycle) = dfs_check(next, edges, visited, path) {
            return Some(cycle);
        }
    }
    path.pop();
    visited.insert(current);

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::{ConfigSource, Configuration, Declarations, DefinitionRegistry};

    struct Egg;
    struct Chicken;
    struct Farm;

    struct CycleConfig;

    impl Configuration for CycleConfig {
        fn declare(beans: &mut Declarations<Self>) {
            beans.function("farm", |_: Arc<Chicken>| Farm);
            beans.function("egg", |_: Arc<Chicken>| Egg);
            beans.function("chicken", |_: Arc<Egg>| Chicken);
        }
    }

    struct SelfAggregateConfig;

    impl Configuration for SelfAggregateConfig {
        fn declare(beans: &mut Declarations<Self>) {
            beans.function("eggs", |_: Vec<Arc<Egg>>, _: Arc<Farm>| Egg);
        }
    }

    fn pending<C: Configuration>() -> Vec<Arc<BeanDefinition>> {
        let mut registry = DefinitionRegistry::new();
        registry.load(ConfigSource::of::<C>());
        registry.into_pending(false)
    }

    #[test]
    fn test_reports_cycle_reached_from_outside() {
        let cycle = find_cycle(&pending::<CycleConfig>()).unwrap();
        assert_eq!(
            cycle,
            "CycleConfig::chicken -> CycleConfig::egg -> CycleConfig::chicken"
        );
    }

    #[test]
    fn test_aggregate_self_edge_is_not_a_cycle() {
        assert!(find_cycle(&pending::<SelfAggregateConfig>()).is_none());
    }
}

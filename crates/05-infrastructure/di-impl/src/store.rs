//! 单例存储与原型表

use di_abstractions::{BeanDefinition, DefinitionId};
use indexmap::IndexMap;
use infrastructure_common::{BeanInstance, DependencyError, DependencyResult, TypeInfo};
use std::sync::Arc;

/// 单例存储
///
/// 名称唯一，按插入顺序排列，每个名称只写入一次。
#[derive(Debug, Default)]
pub struct SingletonStore {
    beans: IndexMap<String, BeanInstance>,
}

impl SingletonStore {
    /// 写入单例，名称已存在时报错
    pub fn insert(&mut self, name: String, bean: BeanInstance) -> DependencyResult<()> {
        if self.beans.contains_key(&name) {
            return Err(DependencyError::DuplicateBeanName { name });
        }
        self.beans.insert(name, bean);
        Ok(())
    }

    /// 按名称获取单例
    pub fn get(&self, name: &str) -> Option<&BeanInstance> {
        self.beans.get(name)
    }

    /// 是否包含指定名称
    pub fn contains(&self, name: &str) -> bool {
        self.beans.contains_key(name)
    }

    /// 指定类型的全部单例，按插入顺序
    pub fn of_type<'a>(
        &'a self,
        type_info: &TypeInfo,
    ) -> impl Iterator<Item = (&'a str, &'a BeanInstance)> + 'a {
        let type_id = type_info.id;
        self.beans
            .iter()
            .filter(move |(_, bean)| bean.type_info().id == type_id)
            .map(|(name, bean)| (name.as_str(), bean))
    }

    /// 是否存在指定类型的单例
    pub fn has_type(&self, type_info: &TypeInfo) -> bool {
        self.of_type(type_info).next().is_some()
    }

    /// 全部名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.beans.keys().map(String::as_str)
    }

    /// 单例数量
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

/// 原型表
///
/// 只保存定义，查找时才创建实例。
#[derive(Debug, Default)]
pub struct PrototypeTable {
    definitions: IndexMap<String, Arc<BeanDefinition>>,
}

impl PrototypeTable {
    /// 登记原型定义，名称已存在时报错
    pub fn insert(&mut self, name: String, definition: Arc<BeanDefinition>) -> DependencyResult<()> {
        if self.definitions.contains_key(&name) {
            return Err(DependencyError::DuplicateBeanName { name });
        }
        self.definitions.insert(name, definition);
        Ok(())
    }

    /// 按名称获取原型定义
    pub fn get(&self, name: &str) -> Option<&Arc<BeanDefinition>> {
        self.definitions.get(name)
    }

    /// 是否包含指定名称
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// 返回类型为 `type_info` 的原型，排除 `exclude`，按声明发现顺序
    pub fn producing(
        &self,
        type_info: &TypeInfo,
        exclude: Option<DefinitionId>,
    ) -> Vec<(&str, &Arc<BeanDefinition>)> {
        let mut matches: Vec<_> = self
            .definitions
            .iter()
            .filter(|(_, definition)| definition.return_type().id == type_info.id)
            .filter(|(_, definition)| Some(definition.id()) != exclude)
            .map(|(name, definition)| (name.as_str(), definition))
            .collect();
        matches.sort_by_key(|(_, definition)| definition.id());
        matches
    }

    /// 是否存在返回指定类型的原型
    pub fn has_type(&self, type_info: &TypeInfo) -> bool {
        self.definitions
            .values()
            .any(|definition| definition.return_type().id == type_info.id)
    }

    /// 全部名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// 原型数量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

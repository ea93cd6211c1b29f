//! Bean 容器抽象接口
//!
//! 提供按名称查找 Bean 的核心抽象以及容器配置

use infrastructure_common::{BeanInstance, DependencyError, DependencyResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Bean 查找 trait
///
/// 单例每次返回同一实例；原型每次查找都会重新创建。
pub trait BeanFactory: Send + Sync {
    /// 按名称查找 Bean
    fn get_bean(&self, name: &str) -> DependencyResult<BeanInstance>;

    /// 按名称查找并转换为具体类型
    fn get_bean_as<T>(&self, name: &str) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
        Self: Sized,
    {
        let bean = self.get_bean(name)?;
        bean.value()
            .clone()
            .downcast::<T>()
            .map_err(|_| DependencyError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: bean.type_info().name.to_string(),
            })
    }

    /// 检查是否存在指定名称的 Bean
    fn contains_bean(&self, name: &str) -> bool;

    /// 指定名称的 Bean 是否为原型
    fn is_prototype(&self, name: &str) -> DependencyResult<bool>;

    /// 全部 Bean 名称，单例按创建顺序在前，原型在后
    fn bean_names(&self) -> Vec<String>;
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 解析前是否按参数数量升序排列定义
    pub sort_by_parameter_count: bool,
    /// 生成名称时标识符与序号之间的分隔符
    pub name_separator: String,
    /// 解析失败时是否诊断待解析定义之间的循环
    pub diagnose_cycles: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            sort_by_parameter_count: true,
            name_separator: "#".to_string(),
            diagnose_cycles: true,
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStats {
    /// 已提取的定义数量
    pub definitions: usize,
    /// 单例数量
    pub singletons: usize,
    /// 原型数量
    pub prototypes: usize,
    /// 不动点解析的轮数（包括最后一轮无进展的扫描）
    pub passes: usize,
}

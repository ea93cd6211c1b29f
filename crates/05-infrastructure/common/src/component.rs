//! Bean 实例与工厂参数
//!
//! 解析引擎只处理类型擦除后的值，类型化的转换由 `di-abstractions` 完成。

use crate::errors::{DependencyError, DependencyResult};
use crate::metadata::TypeInfo;
use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// 类型擦除后的共享 Bean 值
pub type BeanRef = Arc<dyn Any + Send + Sync>;

/// 带类型信息的 Bean 实例
#[derive(Clone)]
pub struct BeanInstance {
    type_info: TypeInfo,
    value: BeanRef,
}

impl BeanInstance {
    /// 包装一个新值
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self::from_shared(Arc::new(value))
    }

    /// 包装已共享的值
    pub fn from_shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            value,
        }
    }

    /// 由已擦除的值创建实例，调用方需保证 `type_info` 与值的实际类型一致
    pub fn from_raw(type_info: TypeInfo, value: BeanRef) -> DependencyResult<Self> {
        let actual = (*value).type_id();
        if actual != type_info.id {
            return Err(DependencyError::creation_failed(
                type_info.name,
                "工厂返回值的实际类型与声明的返回类型不一致",
            ));
        }
        Ok(Self { type_info, value })
    }

    /// 实例类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 擦除后的值
    pub fn value(&self) -> &BeanRef {
        &self.value
    }

    /// 是否为指定类型
    pub fn is<T: Send + Sync + 'static>(&self) -> bool {
        self.type_info.is::<T>()
    }

    /// 向下转型为具体类型
    pub fn downcast<T: Send + Sync + 'static>(&self) -> DependencyResult<Arc<T>> {
        self.value
            .clone()
            .downcast::<T>()
            .map_err(|_| DependencyError::TypeMismatch {
                name: self.type_info.short_name().to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: self.type_info.name.to_string(),
            })
    }

    /// 两个实例是否指向同一对象
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl Debug for BeanInstance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanInstance")
            .field("type", &self.type_info.name)
            .finish_non_exhaustive()
    }
}

/// 交给工厂函数的单个参数
#[derive(Debug, Clone)]
pub enum Argument {
    /// 单个 Bean
    Single(BeanInstance),
    /// 聚合参数（数组或集合）的全部元素，单例在前、原型在后
    Many(Vec<BeanInstance>),
}

impl Argument {
    /// 聚合参数的元素数量，单个参数返回 1
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// 是否为空聚合
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! 参数解析抽象接口
//!
//! 描述工厂参数如何映射为 [`TypeDescriptor`]，以及如何从解析结果中提取出类型化的值

use crate::registry::DefinitionId;
use infrastructure_common::{
    Argument, BeanInstance, CollectionKind, DependencyError, DependencyResult, TypeDescriptor,
};
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

/// 可以作为工厂参数的类型
///
/// - `Arc<T>` 精确匹配 `T`
/// - `Box<[Arc<T>]>` 为 `T` 的数组
/// - `Vec<Arc<T>>` / `VecDeque<Arc<T>>` / `HashSet<Arc<T>>` 为 `T` 的列表、队列、集合
pub trait Parameter: Sized + 'static {
    /// 参数的类型描述
    fn descriptor() -> TypeDescriptor;

    /// 从解析后的参数中提取值
    fn from_argument(argument: Argument) -> DependencyResult<Self>;
}

impl<T: Send + Sync + 'static> Parameter for Arc<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::exact::<T>()
    }

    fn from_argument(argument: Argument) -> DependencyResult<Self> {
        match argument {
            Argument::Single(bean) => bean.downcast::<T>(),
            Argument::Many(_) => Err(unexpected_shape::<Self>("聚合参数")),
        }
    }
}

impl<T: Send + Sync + 'static> Parameter for Box<[Arc<T>]> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array_of::<T>()
    }

    fn from_argument(argument: Argument) -> DependencyResult<Self> {
        Ok(collect_items::<Self, T>(argument)?.into_boxed_slice())
    }
}

impl<T: Send + Sync + 'static> Parameter for Vec<Arc<T>> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection_of::<T>(CollectionKind::List)
    }

    fn from_argument(argument: Argument) -> DependencyResult<Self> {
        collect_items::<Self, T>(argument)
    }
}

impl<T: Send + Sync + 'static> Parameter for VecDeque<Arc<T>> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection_of::<T>(CollectionKind::Queue)
    }

    fn from_argument(argument: Argument) -> DependencyResult<Self> {
        Ok(collect_items::<Self, T>(argument)?.into())
    }
}

impl<T: Eq + Hash + Send + Sync + 'static> Parameter for HashSet<Arc<T>> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection_of::<T>(CollectionKind::Set)
    }

    fn from_argument(argument: Argument) -> DependencyResult<Self> {
        Ok(collect_items::<Self, T>(argument)?.into_iter().collect())
    }
}

fn collect_items<P, T>(argument: Argument) -> DependencyResult<Vec<Arc<T>>>
where
    T: Send + Sync + 'static,
{
    match argument {
        Argument::Many(items) => items.iter().map(BeanInstance::downcast::<T>).collect(),
        Argument::Single(_) => Err(unexpected_shape::<P>("单个参数")),
    }
}

fn unexpected_shape<P>(actual: &str) -> DependencyError {
    DependencyError::TypeMismatch {
        name: "argument".to_string(),
        expected: std::any::type_name::<P>().to_string(),
        actual: actual.to_string(),
    }
}

/// 工厂的完整参数列表
pub trait Parameters: Sized + 'static {
    /// 按声明顺序给出的参数类型描述
    fn descriptors() -> Vec<TypeDescriptor>;

    /// 按声明顺序提取全部参数
    fn from_arguments(arguments: Vec<Argument>) -> DependencyResult<Self>;
}

impl Parameters for () {
    #[inline]
    fn descriptors() -> Vec<TypeDescriptor> {
        Vec::new()
    }

    #[inline]
    fn from_arguments(_: Vec<Argument>) -> DependencyResult<Self> {
        Ok(())
    }
}

fn next_argument<P: Parameter>(
    arguments: &mut impl Iterator<Item = Argument>,
) -> DependencyResult<P> {
    let argument = arguments.next().ok_or_else(|| {
        DependencyError::creation_failed(std::any::type_name::<P>(), "参数数量不足")
    })?;
    P::from_argument(argument)
}

macro_rules! define_parameters {
    ($($T: ident),*) => {
        impl<$($T: Parameter),+> Parameters for ($($T,)+) {
            #[inline]
            fn descriptors() -> Vec<TypeDescriptor> {
                vec![$($T::descriptor(),)+]
            }

            #[inline]
            fn from_arguments(arguments: Vec<Argument>) -> DependencyResult<Self> {
                let mut arguments = arguments.into_iter();
                let tuple = (
                    $(
                    next_argument::<$T>(&mut arguments)?,
                    )*
                );
                Ok(tuple)
            }
        }
    }
}

define_parameters! { T1 }
define_parameters! { T1, T2 }
define_parameters! { T1, T2, T3 }
define_parameters! { T1, T2, T3, T4 }
define_parameters! { T1, T2, T3, T4, T5 }
define_parameters! { T1, T2, T3, T4, T5, T6 }

/// 解析上下文
///
/// 记录原型实例化过程中的定义链，用于在原型之间相互引用时报告循环依赖。
/// 链上以 [`DefinitionId`] 区分定义，显示名称只用于错误信息。
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<(DefinitionId, String)>,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加定义到解析链
    pub fn push(&mut self, id: DefinitionId, label: impl Into<String>) -> DependencyResult<()> {
        let label = label.into();
        if self.resolution_chain.iter().any(|(entry, _)| *entry == id) {
            let chain: Vec<&str> = self
                .resolution_chain
                .iter()
                .map(|(_, label)| label.as_str())
                .chain(std::iter::once(label.as_str()))
                .collect();
            return Err(DependencyError::CircularDependency {
                dependency_chain: chain.join(" -> "),
            });
        }
        self.resolution_chain.push((id, label));
        Ok(())
    }

    /// 从解析链中移除最近的定义
    pub fn pop(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}

//! 元数据定义
//!
//! 提供 Bean 类型与工厂参数的类型描述信息

use std::any::TypeId;
use std::fmt::{self, Display, Formatter};

/// 类型信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 完整类型名称
    pub name: &'static str,
    /// 类型ID
    pub id: TypeId,
}

impl TypeInfo {
    /// 创建新的类型信息
    pub fn new(id: TypeId, name: &'static str) -> Self {
        Self { name, id }
    }

    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        match self.name.find('<') {
            // 泛型类型保留完整名称，避免截断参数列表
            Some(_) => self.name,
            None => self.name.rsplit("::").next().unwrap_or(self.name),
        }
    }

    /// 是否为指定类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// 集合形态
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// 有序列表
    List,
    /// 先进先出队列
    Queue,
    /// 基于相等性去重的集合
    Set,
    /// 未识别的集合形态，构建时报错
    Other(String),
}

impl CollectionKind {
    /// 根据形态名称解析集合类型
    ///
    /// 无法识别的名称不会在此处失败，而是保留为 [`CollectionKind::Other`]，
    /// 由解析引擎在构建参数时报告。
    pub fn from_shape(shape: &str) -> Self {
        match shape.trim().to_ascii_lowercase().as_str() {
            "list" | "vec" | "array_list" => Self::List,
            "queue" | "deque" | "vec_deque" | "linked_list" => Self::Queue,
            "set" | "hash_set" => Self::Set,
            _ => Self::Other(shape.to_string()),
        }
    }

    /// 是否为支持的集合形态
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// 形态名称
    pub fn shape(&self) -> &str {
        match self {
            Self::List => "List",
            Self::Queue => "Queue",
            Self::Set => "Set",
            Self::Other(shape) => shape,
        }
    }
}

/// 工厂参数的类型描述
///
/// 支持三种匹配模式：精确类型、`T` 的数组、`T` 的集合。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// 精确类型
    Exact(TypeInfo),
    /// 元素类型为 `T` 的数组
    Array(TypeInfo),
    /// 元素类型为 `T` 的集合
    Collection(CollectionKind, TypeInfo),
}

impl TypeDescriptor {
    /// 精确类型描述
    pub fn exact<T: ?Sized + 'static>() -> Self {
        Self::Exact(TypeInfo::of::<T>())
    }

    /// 数组类型描述
    pub fn array_of<T: ?Sized + 'static>() -> Self {
        Self::Array(TypeInfo::of::<T>())
    }

    /// 集合类型描述
    pub fn collection_of<T: ?Sized + 'static>(kind: CollectionKind) -> Self {
        Self::Collection(kind, TypeInfo::of::<T>())
    }

    /// 精确类型或聚合类型的元素类型
    pub fn component(&self) -> &TypeInfo {
        match self {
            Self::Exact(info) | Self::Array(info) | Self::Collection(_, info) => info,
        }
    }

    /// 是否为聚合类型（数组或集合）
    pub fn is_aggregate(&self) -> bool {
        !matches!(self, Self::Exact(_))
    }

    /// 精确匹配指定类型
    pub fn matches(&self, type_info: &TypeInfo) -> bool {
        matches!(self, Self::Exact(info) if info.id == type_info.id)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(info) => write!(f, "{info}"),
            Self::Array(info) => write!(f, "[{info}]"),
            Self::Collection(kind, info) => write!(f, "{}<{info}>", kind.shape()),
        }
    }
}

//! # Infrastructure Common
//!
//! 这个 crate 提供了 Bean 容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`TypeInfo`] / [`TypeDescriptor`] - 类型标识与参数匹配描述
//! - [`Lifetime`] - Bean 生命周期（单例 / 原型）
//! - [`BeanInstance`] / [`Argument`] - 类型擦除后的 Bean 实例与工厂参数
//! - [`DependencyError`] - 容器构建与查找错误
//!
//! ## 设计原则
//!
//! - 基于 `TypeId` 的精确类型匹配
//! - 不持有任何全局状态，每个容器独立拥有自己的存储

pub mod component;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use component::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;

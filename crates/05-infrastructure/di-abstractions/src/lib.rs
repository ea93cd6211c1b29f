//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义 Bean 声明提取和查找的核心接口。
//!
//! ## 核心接口
//!
//! - [`Configuration`] / [`Declarations`] - 配置源声明 Bean 工厂
//! - [`DefinitionRegistry`] - 从配置源提取 [`BeanDefinition`]
//! - [`BeanFunction`] / [`BeanMethod`] - 类型化工厂适配
//! - [`Parameter`] / [`Parameters`] - 工厂参数的类型描述与提取
//! - [`BeanFactory`] - 按名称查找 Bean

pub mod container;
pub mod factory;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;

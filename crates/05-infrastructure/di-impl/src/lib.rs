//! # 依赖注入具体实现
//!
//! 提供 Bean 解析引擎和容器实现：
//!
//! - 不动点调度：反复扫描待解析定义，直到一轮扫描没有任何进展
//! - 参数满足：精确类型、数组与集合聚合、歧义检测
//! - 单例与原型的生命周期管理

mod aggregate;
mod container;
mod diagnostics;
mod engine;
mod store;

pub use container::{BeanContainer, BeanContainerBuilder};
pub use di_abstractions::BeanFactory;
pub use store::{PrototypeTable, SingletonStore};

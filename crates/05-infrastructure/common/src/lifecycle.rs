//! Bean 生命周期

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Bean 生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// 单例模式 - 容器生命周期内只创建一个实例
    #[default]
    Singleton,
    /// 原型模式 - 每次查找都创建新实例，不缓存
    Prototype,
}

impl Lifetime {
    /// 是否为原型
    pub fn is_prototype(self) -> bool {
        matches!(self, Self::Prototype)
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Prototype => f.write_str("prototype"),
        }
    }
}

//! 示例领域类型

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// 恒星
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Star {
    pub name: String,
}

impl Star {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 行星
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Planet {
    pub name: String,
}

impl Planet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// 恒星系
#[derive(Debug)]
pub struct StarSystem {
    pub star: Arc<Star>,
    pub planets: Vec<Arc<Planet>>,
}

impl Display for StarSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let planets: Vec<_> = self.planets.iter().map(|p| p.name.as_str()).collect();
        write!(f, "{} [{}]", self.star.name, planets.join(", "))
    }
}

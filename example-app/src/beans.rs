//! 示例配置源

use crate::domain::{Planet, Star, StarSystem};
use component_macros::configuration;
use std::collections::HashSet;
use std::sync::Arc;

/// 太阳系配置
#[derive(Debug, Default)]
pub struct HardBeansConfig;

#[configuration(default)]
impl HardBeansConfig {
    #[bean("Sun")]
    fn get_sun() -> Star {
        Star::new("Sun")
    }

    #[bean("Earth")]
    fn get_earth() -> Planet {
        Planet::new("Earth")
    }

    // 绑定方法，每次调用前都会创建新的配置实例
    #[bean("Mars")]
    fn get_mars(&self) -> Planet {
        Planet::new("Mars")
    }

    #[bean("Ssys")]
    fn get_solar_system(sun: Arc<Star>, planets: Vec<Arc<Planet>>) -> StarSystem {
        StarSystem { star: sun, planets }
    }

    #[bean("Ssys2")]
    fn get_solar_system_from_array(sun: Arc<Star>, planets: Box<[Arc<Planet>]>) -> StarSystem {
        StarSystem {
            star: sun,
            planets: planets.into_vec(),
        }
    }

    #[bean("Ssys3")]
    fn get_solar_system_from_set(sun: Arc<Star>, planets: HashSet<Arc<Planet>>) -> StarSystem {
        let mut planets: Vec<_> = planets.into_iter().collect();
        planets.sort_by(|a, b| a.name.cmp(&b.name));
        StarSystem { star: sun, planets }
    }
}

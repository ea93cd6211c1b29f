//! Centralized integration tests for component-macros

use component_macros::configuration;
use di_impl::{BeanContainer, BeanFactory};
use infrastructure_common::DependencyError;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct Star {
    name: String,
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct Planet {
    name: String,
}

#[derive(Debug)]
struct StarSystem {
    star: Arc<Star>,
    planets: Vec<Arc<Planet>>,
}

#[derive(Default)]
struct HardBeansConfig;

#[configuration(default)]
impl HardBeansConfig {
    #[bean("Sun")]
    fn get_sun() -> Star {
        Star {
            name: "Sun".to_string(),
        }
    }

    #[bean("Earth")]
    fn get_earth() -> Planet {
        Planet {
            name: "Earth".to_string(),
        }
    }

    #[bean("Mars")]
    fn get_mars(&self) -> Planet {
        Planet {
            name: "Mars".to_string(),
        }
    }

    #[bean("Ssys")]
    fn get_solar_system(sun: Arc<Star>, planets: Vec<Arc<Planet>>) -> StarSystem {
        StarSystem {
            star: sun,
            planets,
        }
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
        StarSystem {
            star: sun,
            planets: planets.into_iter().collect(),
        }
    }
}

#[test]
fn test_hard_beans_configuration() {
    let container = BeanContainer::builder()
        .add_configuration::<HardBeansConfig>()
        .build()
        .unwrap();

    assert_eq!(container.stats().singletons, 6);

    let ssys = container.get_bean_as::<StarSystem>("Ssys").unwrap();
    let names: Vec<_> = ssys.planets.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Earth", "Mars"]);

    let ssys2 = container.get_bean_as::<StarSystem>("Ssys2").unwrap();
    assert_eq!(ssys2.planets.len(), 2);
    assert!(Arc::ptr_eq(&ssys.star, &ssys2.star));

    let ssys3 = container.get_bean_as::<StarSystem>("Ssys3").unwrap();
    assert_eq!(ssys3.planets.len(), 2);
}

struct BrokenConfig;

#[configuration]
impl BrokenConfig {
    #[bean("Pluto")]
    fn pluto(&self) -> Planet {
        Planet {
            name: "Pluto".to_string(),
        }
    }
}

#[test]
fn test_bound_factory_without_default_fails_build() {
    let err = BeanContainer::builder()
        .add_configuration::<BrokenConfig>()
        .build()
        .unwrap_err();
    assert!(matches!(err, DependencyError::BadConfiguration { .. }));
}

#[derive(Default)]
struct ProbeConfig;

#[configuration(default)]
impl ProbeConfig {
    #[bean(name = "Probe", prototype)]
    fn probe(sun: Arc<Star>) -> Planet {
        Planet {
            name: format!("probe of {}", sun.name),
        }
    }
}

#[test]
fn test_configurations_combine_across_sources() {
    let container = BeanContainer::builder()
        .add_configuration::<ProbeConfig>()
        .add_configuration::<HardBeansConfig>()
        .build()
        .unwrap();

    let probe = container.get_bean_as::<Planet>("Probe").unwrap();
    assert_eq!(probe.name, "probe of Sun");

    // 原型 Probe 也会进入 Planet 列表
    let ssys = container.get_bean_as::<StarSystem>("Ssys").unwrap();
    assert_eq!(ssys.planets.len(), 3);
}

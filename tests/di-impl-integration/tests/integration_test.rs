//! 容器构建失败与查找边界的集中集成测试

use di_abstractions::{Configuration, ContainerStats, Declarations};
use di_impl::{BeanContainer, BeanFactory};
use infrastructure_common::{
    BeanInstance, CollectionKind, DependencyError, TypeDescriptor, TypeInfo,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct Planet(&'static str);

#[derive(Debug)]
struct Comet;

#[derive(Debug)]
struct Observatory {
    planets: usize,
}

fn build<C: Configuration>() -> Result<BeanContainer, DependencyError> {
    BeanContainer::builder().add_configuration::<C>().build()
}

struct TwinPlanets;

impl Configuration for TwinPlanets {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans.function("get_mars", || Planet("Mars")).named("Mars");
        beans.function("get_observatory", |_: Arc<Planet>| Observatory { planets: 1 });
    }
}

#[test]
fn test_two_singletons_are_ambiguous() {
    match build::<TwinPlanets>() {
        Err(DependencyError::AmbiguousBean {
            definition,
            candidates,
            ..
        }) => {
            assert_eq!(definition, "TwinPlanets::get_observatory");
            assert_eq!(candidates, vec!["Earth", "Mars"]);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

struct SingletonAndPrototype;

impl Configuration for SingletonAndPrototype {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans
            .function("get_mars", || Planet("Mars"))
            .named("Mars")
            .prototype();
        beans.function("get_observatory", |_: Arc<Planet>| Observatory { planets: 1 });
    }
}

#[test]
fn test_singleton_and_prototype_are_ambiguous() {
    let err = build::<SingletonAndPrototype>().unwrap_err();
    assert!(matches!(err, DependencyError::AmbiguousBean { .. }));
    assert!(err.is_configuration_error());
}

struct EmptySky;

impl Configuration for EmptySky {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_observatory", |planets: Vec<Arc<Planet>>| Observatory {
            planets: planets.len(),
        });
        beans.function("get_queue", |planets: VecDeque<Arc<Planet>>| planets.len());
        beans.function("get_array", |planets: Box<[Arc<Planet>]>| planets.len() as u32);
    }
}

#[test]
fn test_aggregates_without_sources_are_empty() -> anyhow::Result<()> {
    let container = build::<EmptySky>()?;

    assert_eq!(
        container
            .get_bean_as::<Observatory>("get_observatory#0")?
            .planets,
        0
    );
    assert_eq!(*container.get_bean_as::<usize>("get_queue#0")?, 0);
    assert_eq!(*container.get_bean_as::<u32>("get_array#0")?, 0);
    Ok(())
}

struct DistinctPlanets;

impl Configuration for DistinctPlanets {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans.function("get_earth_again", || Planet("Earth")).named("Earth2");
        beans.function("get_catalog", |planets: HashSet<Arc<Planet>>| planets.len());
    }
}

#[test]
fn test_set_parameter_suppresses_equal_planets() -> anyhow::Result<()> {
    let container = build::<DistinctPlanets>()?;
    assert_eq!(*container.get_bean_as::<usize>("get_catalog#0")?, 1);
    Ok(())
}

struct LonelyObservatory;

impl Configuration for LonelyObservatory {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans.function("get_observatory", |_: Arc<Comet>| Observatory { planets: 0 });
    }
}

#[test]
fn test_missing_source_is_unsatisfiable() {
    match build::<LonelyObservatory>() {
        Err(DependencyError::UnsatisfiableDependency {
            definition,
            missing,
            pending,
            cycle,
        }) => {
            assert_eq!(definition, "LonelyObservatory::get_observatory");
            assert_eq!(missing, "Comet");
            assert_eq!(pending, vec!["LonelyObservatory::get_observatory"]);
            assert!(cycle.is_none());
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[derive(Debug)]
struct Egg;

#[derive(Debug)]
struct Chicken;

struct ChickenAndEgg;

impl Configuration for ChickenAndEgg {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_egg", |_: Arc<Chicken>| Egg);
        beans.function("get_chicken", |_: Arc<Egg>| Chicken);
    }
}

#[test]
fn test_unsatisfiable_error_reports_cycle() {
    match build::<ChickenAndEgg>() {
        Err(DependencyError::UnsatisfiableDependency { pending, cycle, .. }) => {
            assert_eq!(pending.len(), 2);
            assert_eq!(
                cycle.as_deref(),
                Some("ChickenAndEgg::get_egg -> ChickenAndEgg::get_chicken -> ChickenAndEgg::get_egg")
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

struct DuplicateNames;

impl Configuration for DuplicateNames {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans.function("get_terra", || Planet("Terra")).named("Earth");
    }
}

#[test]
fn test_duplicate_name_is_rejected() {
    match build::<DuplicateNames>() {
        Err(DependencyError::DuplicateBeanName { name }) => assert_eq!(name, "Earth"),
        other => panic!("unexpected result: {other:?}"),
    }
}

struct TreeMapConfig;

impl Configuration for TreeMapConfig {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans.raw(
            "get_index",
            vec![TypeDescriptor::Collection(
                CollectionKind::from_shape("tree_map"),
                TypeInfo::of::<Planet>(),
            )],
            TypeInfo::of::<Observatory>(),
            |_| Ok(BeanInstance::new(Observatory { planets: 0 })),
        );
    }
}

#[test]
fn test_unknown_collection_shape_is_unsupported() {
    match build::<TreeMapConfig>() {
        Err(DependencyError::UnsupportedComposite { shape, .. }) => assert_eq!(shape, "tree_map"),
        other => panic!("unexpected result: {other:?}"),
    }
}

struct NoConstructor;

impl NoConstructor {
    fn planet(&self) -> Planet {
        Planet("Mars")
    }
}

impl Configuration for NoConstructor {
    fn declare(beans: &mut Declarations<Self>) {
        beans.method("get_mars", Self::planet).named("Mars");
    }
}

#[test]
fn test_bound_method_without_constructor_is_bad_configuration() {
    match build::<NoConstructor>() {
        Err(DependencyError::BadConfiguration {
            definition,
            configuration,
        }) => {
            assert_eq!(definition, "NoConstructor::get_mars");
            assert!(configuration.ends_with("NoConstructor"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[derive(Debug)]
struct Ping {
    pongs: usize,
}

#[derive(Debug)]
struct Pong;

struct PingPong;

impl Configuration for PingPong {
    fn declare(beans: &mut Declarations<Self>) {
        beans
            .function("get_ping", |pongs: Vec<Arc<Pong>>| Ping { pongs: pongs.len() })
            .named("Ping")
            .prototype();
        beans
            .function("get_pong", |_: Vec<Arc<Ping>>| Pong)
            .named("Pong")
            .prototype();
        beans.function("get_seed", || Pong).named("Seed");
    }
}

#[test]
fn test_mutually_recursive_prototypes_report_cycle() {
    let container = build::<PingPong>().unwrap();
    assert_eq!(container.stats().prototypes, 2);

    match container.get_bean("Ping") {
        Err(DependencyError::CircularDependency { dependency_chain }) => {
            assert_eq!(
                dependency_chain,
                "PingPong::get_ping -> PingPong::get_pong -> PingPong::get_ping"
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

mod north {
    use super::Planet;
    use di_abstractions::{Configuration, Declarations};

    pub struct Config;

    impl Configuration for Config {
        fn declare(beans: &mut Declarations<Self>) {
            beans
                .function("get_planet", || Planet("Earth"))
                .named("A")
                .prototype();
        }
    }
}

mod south {
    use super::{Observatory, Planet};
    use di_abstractions::{Configuration, Declarations};
    use std::sync::Arc;

    pub struct Config;

    impl Configuration for Config {
        fn declare(beans: &mut Declarations<Self>) {
            beans
                .function("get_planet", |planets: Vec<Arc<Planet>>| Observatory {
                    planets: planets.len(),
                })
                .named("B")
                .prototype();
        }
    }
}

#[test]
fn test_same_named_prototypes_are_not_a_cycle() -> anyhow::Result<()> {
    let container = BeanContainer::builder()
        .add_configuration::<north::Config>()
        .add_configuration::<south::Config>()
        .build()?;

    let observatory = container.get_bean_as::<Observatory>("B")?;
    assert_eq!(observatory.planets, 1);
    Ok(())
}

#[test]
fn test_lookup_errors_are_recoverable() {
    let container = build::<DistinctPlanets>().unwrap();

    let err = container.get_bean("Pluto").unwrap_err();
    assert!(matches!(err, DependencyError::UnknownBeanName { .. }));
    assert!(!err.is_configuration_error());
    assert!(container.is_prototype("Pluto").is_err());

    let err = container.get_bean_as::<Comet>("Earth").unwrap_err();
    assert!(matches!(err, DependencyError::TypeMismatch { .. }));
    assert!(!err.is_configuration_error());
}

#[test]
fn test_concurrent_lookups_share_singletons() {
    let container = build::<SingletonAndPrototypeLookup>().unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let earth = container.get_bean_as::<Planet>("Earth").unwrap();
                    let mars = container.get_bean_as::<Planet>("Mars").unwrap();
                    (earth, mars)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (earth, mars) in &results[1..] {
            assert!(Arc::ptr_eq(earth, &results[0].0));
            assert!(!Arc::ptr_eq(mars, &results[0].1));
        }
    });
}

struct SingletonAndPrototypeLookup;

impl Configuration for SingletonAndPrototypeLookup {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans
            .function("get_mars", || Planet("Mars"))
            .named("Mars")
            .prototype();
    }
}

#[test]
fn test_stats_serialize_to_json() -> anyhow::Result<()> {
    let container = build::<SingletonAndPrototypeLookup>()?;
    let json = serde_json::to_value(container.stats())?;
    assert_eq!(json["singletons"], 1);
    assert_eq!(json["prototypes"], 1);

    let stats: ContainerStats = serde_json::from_value(json)?;
    assert_eq!(&stats, container.stats());
    Ok(())
}

struct AmbiguousPrototype;

impl Configuration for AmbiguousPrototype {
    fn declare(beans: &mut Declarations<Self>) {
        beans.function("get_earth", || Planet("Earth")).named("Earth");
        beans.function("get_mars", || Planet("Mars")).named("Mars");
        beans
            .function("get_observatory", |_: Arc<Planet>| Observatory { planets: 1 })
            .prototype();
    }
}

#[test]
fn test_prototype_arguments_are_checked_at_build() {
    match build::<AmbiguousPrototype>() {
        Err(DependencyError::AmbiguousBean { definition, .. }) => {
            assert_eq!(definition, "AmbiguousPrototype::get_observatory");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

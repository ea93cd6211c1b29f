use component_macros::configuration;
use di_abstractions::{ConfigSource, Configuration};
use std::sync::Arc;

struct Star;
struct Planet(Arc<Star>);

#[derive(Default)]
struct SkyConfig;

#[configuration(default)]
impl SkyConfig {
    #[bean("Sun")]
    fn sun() -> Star {
        Star
    }

    #[bean]
    fn earth(&self, star: Arc<Star>) -> Planet {
        Planet(star)
    }
}

fn main() {
    let source = ConfigSource::of::<SkyConfig>();
    assert_eq!(source.declarations().len(), 2);
    assert!(SkyConfig::instantiate().is_some());
}

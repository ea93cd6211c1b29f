use component_macros::configuration;
use di_abstractions::ConfigSource;
use std::collections::VecDeque;
use std::sync::Arc;

struct Moon;
struct Orbit(usize);

struct MoonConfig;

#[configuration]
impl MoonConfig {
    #[prototype]
    fn moon() -> Moon {
        Moon
    }

    #[bean(name = "Orbit", singleton)]
    fn orbit(moons: VecDeque<Arc<Moon>>) -> Orbit {
        Orbit(moons.len())
    }
}

fn main() {
    let source = ConfigSource::of::<MoonConfig>();
    assert_eq!(source.declarations()[1].explicit_name(), Some("Orbit"));
}

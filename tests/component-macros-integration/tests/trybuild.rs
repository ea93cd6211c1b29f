//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_configuration_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/configuration_ok.rs");
    t.pass("tests/trybuild/prototype_ok.rs");
}

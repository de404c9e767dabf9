use skiff_config::{BuildTarget, ConfigError, SkiffConfig};

fn config(builds: Vec<BuildTarget>) -> SkiffConfig {
    SkiffConfig {
        builds,
        ..SkiffConfig::default()
    }
}

#[test]
fn example_config_is_valid() {
    SkiffConfig::example().validate().unwrap();
}

#[test]
fn no_builds_is_rejected() {
    assert!(matches!(config(Vec::new()).validate(), Err(ConfigError::NoBuilds)));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = config(vec![
        BuildTarget::new("api", ["webpack"]),
        BuildTarget::new("api", ["webpack", "--mode", "production"]),
    ])
    .validate()
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateBuild(name) if name == "api"));
}

#[test]
fn empty_command_is_rejected() {
    let err = config(vec![BuildTarget::new("api", Vec::<String>::new())])
        .validate()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid value for `builds.api.command`: provide the bundler program and its arguments"
    );
}

#[test]
fn blank_name_is_rejected() {
    let err = config(vec![BuildTarget::new(" ", ["webpack"])])
        .validate()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn toml_round_trips_through_from_toml() {
    let text = toml::to_string(&SkiffConfig::example()).unwrap();
    assert_eq!(SkiffConfig::from_toml(&text).unwrap(), SkiffConfig::example());
}

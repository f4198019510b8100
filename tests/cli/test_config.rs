use std::io::Write;
use std::time::Duration;

use deliberate_agent::config::{
    ConfigError, DemoProfile, FileConfig, ServerLaunch, load_overrides, read_config_file,
};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_presets() {
    let cloud = DemoProfile::cloud();
    assert_eq!(cloud.server, ServerLaunch::npx_package());
    assert_eq!(cloud.max_steps, 8);
    assert_eq!(cloud.demo_queries.len(), 4);
    assert!(cloud.allow_skip);

    let local = DemoProfile::local();
    assert_eq!(local.server, ServerLaunch::new("node", ["build/index.js"]));
    assert_eq!(local.max_steps, 6);
    assert_eq!(local.demo_queries.len(), 3);
    assert!(!local.allow_skip);
}

#[test]
fn test_full_override_file() {
    let file = config_file(
        r#"
max_steps = 3
request_timeout_secs = 42

[server]
command = "node"
args = ["/opt/deliberation/build/index.js"]
"#,
    );

    let overrides = read_config_file(file.path()).unwrap();
    let mut profile = DemoProfile::cloud();
    profile.apply(overrides).unwrap();

    assert_eq!(profile.max_steps, 3);
    assert_eq!(profile.request_timeout, Duration::from_secs(42));
    assert_eq!(
        profile.server,
        ServerLaunch::new("node", ["/opt/deliberation/build/index.js"])
    );
}

#[test]
fn test_partial_override_keeps_preset() {
    let file = config_file("max_steps = 10\n");
    let overrides = load_overrides(Some(file.path())).unwrap();

    let mut profile = DemoProfile::local();
    profile.apply(overrides).unwrap();

    assert_eq!(profile.max_steps, 10);
    assert_eq!(profile.server, DemoProfile::local().server);
    assert_eq!(profile.request_timeout, DemoProfile::local().request_timeout);
}

#[test]
fn test_server_args_default_to_empty() {
    let file = config_file("[server]\ncommand = \"deliberation-server\"\n");
    let overrides = read_config_file(file.path()).unwrap();

    assert_eq!(
        overrides.server,
        Some(ServerLaunch::new("deliberation-server", Vec::<String>::new()))
    );
}

#[test]
fn test_unknown_key_is_rejected() {
    let file = config_file("max_stepz = 3\n");
    let err = read_config_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_overrides(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut profile = DemoProfile::cloud();

    let empty_command = FileConfig {
        server: Some(ServerLaunch::new("  ", Vec::<String>::new())),
        ..FileConfig::default()
    };
    assert!(matches!(
        profile.apply(empty_command),
        Err(ConfigError::Invalid(_))
    ));

    let zero_steps = FileConfig {
        max_steps: Some(0),
        ..FileConfig::default()
    };
    assert!(matches!(profile.apply(zero_steps), Err(ConfigError::Invalid(_))));
    assert_eq!(profile.max_steps, 8);
}

//! Configuration layering: defaults, file, environment, flags.

use chipstack_cli::config::{self, ConfigOverrides, ValueSource};
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &[
    "CHIPSTACK_CONFIG",
    "CHIPSTACK_STARTING_CHIPS",
    "CHIPSTACK_SMALL_BLIND",
    "CHIPSTACK_SEED",
    "CHIPSTACK_TURN_TIMEOUT",
];

fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

fn set_env(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn cfg_json() -> (i32, serde_json::Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = chipstack_cli::run(vec!["chipstack", "cfg"], &mut out, &mut err);
    let stdout = String::from_utf8(out).unwrap();
    let value = serde_json::from_str(&stdout).unwrap_or(serde_json::Value::Null);
    (code, value, String::from_utf8(err).unwrap())
}

#[test]
#[serial]
fn defaults_are_reported_as_defaults() {
    clear_env();
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["starting_chips"]["value"], 1000);
    assert_eq!(json["starting_chips"]["source"], "default");
    assert_eq!(json["small_blind"]["value"], 10);
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn file_values_override_defaults() {
    clear_env();
    let file = config_file("starting_chips = 500\nsmall_blind = 5\n");
    set_env("CHIPSTACK_CONFIG", file.path().to_str().unwrap());

    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["starting_chips"]["value"], 500);
    assert_eq!(json["starting_chips"]["source"], "file");
    assert_eq!(json["small_blind"]["value"], 5);
    assert_eq!(json["turn_timeout_secs"]["source"], "default");
    clear_env();
}

#[test]
#[serial]
fn environment_overrides_file() {
    clear_env();
    let file = config_file("small_blind = 5\n");
    set_env("CHIPSTACK_CONFIG", file.path().to_str().unwrap());
    set_env("CHIPSTACK_SMALL_BLIND", "25");
    set_env("CHIPSTACK_SEED", "77");

    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.small_blind, 25);
    assert_eq!(resolved.sources.small_blind, ValueSource::Env);
    assert_eq!(resolved.config.seed, Some(77));
    clear_env();
}

#[test]
#[serial]
fn flags_override_environment() {
    clear_env();
    set_env("CHIPSTACK_STARTING_CHIPS", "400");
    let resolved = config::load_with_overrides(ConfigOverrides {
        starting_chips: Some(800),
        turn_timeout_secs: Some(30),
        ..ConfigOverrides::default()
    })
    .unwrap();
    assert_eq!(resolved.config.starting_chips, 800);
    assert_eq!(resolved.sources.starting_chips, ValueSource::Cli);
    assert_eq!(resolved.config.turn_timeout_secs, Some(30));
    assert_eq!(resolved.sources.small_blind, ValueSource::Default);
    clear_env();
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    clear_env();
    let file = config_file("big_blind = 20\n");
    set_env("CHIPSTACK_CONFIG", file.path().to_str().unwrap());

    let (code, _, stderr) = cfg_json();
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot parse config file"), "stderr: {stderr}");
    clear_env();
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    clear_env();
    set_env("CHIPSTACK_CONFIG", "/nonexistent/chipstack.toml");
    let (code, _, stderr) = cfg_json();
    assert_eq!(code, 2);
    assert!(stderr.contains("cannot read config file"));
    clear_env();
}

#[test]
#[serial]
fn malformed_environment_value_is_an_error() {
    clear_env();
    set_env("CHIPSTACK_SEED", "soon");
    let err = config::load_with_sources().unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for CHIPSTACK_SEED: soon");
    clear_env();
}

#[test]
#[serial]
fn zero_timeout_fails_validation() {
    clear_env();
    set_env("CHIPSTACK_TURN_TIMEOUT", "0");
    let err = config::load_with_sources().unwrap_err();
    assert!(err.to_string().starts_with("Invalid configuration"));
    clear_env();
}

#[test]
#[serial]
fn play_uses_the_file_configuration() {
    clear_env();
    let file = config_file("starting_chips = 300\nsmall_blind = 5\nseed = 11\n");
    set_env("CHIPSTACK_CONFIG", file.path().to_str().unwrap());

    let mut input = "q\n".as_bytes();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = chipstack_cli::run_with_input(
        vec!["chipstack", "play", "--players", "a,b"],
        &mut input,
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);
    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.starts_with("play: players=a,b chips=300 small_blind=5 seed=11"));
    clear_env();
}

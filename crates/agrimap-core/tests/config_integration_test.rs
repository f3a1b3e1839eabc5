//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use agrimap_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn clear_env() {
    env::remove_var("AGRIMAP_BASE_URL");
    env::remove_var("AGRIMAP_RECONNECT_DELAY");
    env::remove_var("AGRIMAP_REQUEST_TIMEOUT");
    env::remove_var("AGRIMAP_ALERTS");
}

fn config_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
base_url = "http://file.example:5000"
reconnect_delay_secs = 9
request_timeout_secs = 15
"#
    )
    .unwrap();
    file
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    env::set_var("AGRIMAP_BASE_URL", "https://env.example");
    env::set_var("AGRIMAP_RECONNECT_DELAY", "2");

    let file = config_file();
    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.base_url.value, "https://env.example");
    assert_eq!(config.base_url.source, ConfigSource::Environment);
    assert_eq!(config.reconnect_delay(), Duration::from_secs(2));
    assert_eq!(config.reconnect_delay_secs.source, ConfigSource::Environment);
    // Not set in the environment, so the file wins
    assert_eq!(config.request_timeout(), Duration::from_secs(15));
    assert_eq!(config.request_timeout_secs.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_values_are_ignored() {
    clear_env();
    env::set_var("AGRIMAP_RECONNECT_DELAY", "soon");
    env::set_var("AGRIMAP_REQUEST_TIMEOUT", "0");
    env::set_var("AGRIMAP_ALERTS", "sometimes");
    env::set_var("AGRIMAP_BASE_URL", "ftp://nope");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.reconnect_delay_secs.source, ConfigSource::Default);
    assert_eq!(config.request_timeout_secs.source, ConfigSource::Default);
    assert_eq!(config.alerts.source, ConfigSource::Default);
    assert_eq!(config.base_url.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_everything() {
    clear_env();
    env::set_var("AGRIMAP_ALERTS", "true");

    let file = config_file();
    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    config.update_from_cli(CliConfigOverrides {
        base_url: Some("http://cli.example".to_string()),
        alerts: Some(false),
        ..Default::default()
    });

    assert_eq!(config.base_url.value, "http://cli.example");
    assert_eq!(config.base_url.source, ConfigSource::Cli);
    assert!(!config.alerts.value);
    assert_eq!(config.alerts.source, ConfigSource::Cli);
    assert_eq!(config.reconnect_delay_secs.source, ConfigSource::File);

    clear_env();
}

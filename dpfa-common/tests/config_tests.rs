//! Tests for configuration loading and precedence
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that point XDG_CONFIG_HOME at a temporary directory are marked with
//! #[serial] so they run sequentially.

use dpfa_common::config::{default_config_path, load_settings, ConfigLayer};
use dpfa_common::Error;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;

fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_explicit_config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        r#"
database_path = "/srv/dpfa/archive.db"
port = 9100
base_url = "https://mirror.example.org/"
webhook_url = "https://hooks.example.org/contact"
"#,
    );

    let settings = load_settings(&ConfigLayer::default(), Some(&path)).unwrap();
    assert_eq!(settings.database_path, PathBuf::from("/srv/dpfa/archive.db"));
    assert_eq!(settings.port, 9100);
    assert_eq!(settings.base_url, "https://mirror.example.org");
    assert_eq!(
        settings.webhook_url.as_deref(),
        Some("https://hooks.example.org/contact")
    );
}

#[test]
fn test_cli_overrides_beat_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "port = 9100\nbind_addr = \"0.0.0.0\"\n");

    let overrides = ConfigLayer {
        port: Some(8088),
        ..Default::default()
    };
    let settings = load_settings(&overrides, Some(&path)).unwrap();
    assert_eq!(settings.port, 8088);
    assert_eq!(settings.bind_addr, "0.0.0.0");
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    let result = load_settings(&ConfigLayer::default(), Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_keys_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "prot = 9100\n");

    let result = load_settings(&ConfigLayer::default(), Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    // Nothing written yet: compiled defaults
    let settings = load_settings(&ConfigLayer::default(), None).unwrap();
    assert_eq!(settings.port, 8000);
    assert_eq!(settings.webhook_url, None);

    env::remove_var("XDG_CONFIG_HOME");
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_default_location_is_read_when_present() {
    let dir = tempfile::tempdir().unwrap();
    env::set_var("XDG_CONFIG_HOME", dir.path());

    let path = default_config_path().unwrap();
    assert!(path.starts_with(dir.path()));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "port = 9200\n").unwrap();

    let settings = load_settings(&ConfigLayer::default(), None).unwrap();
    assert_eq!(settings.port, 9200);

    env::remove_var("XDG_CONFIG_HOME");
}

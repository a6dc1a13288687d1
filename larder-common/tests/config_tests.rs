//! Configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that touch LARDER_ROOT or LARDER_API_BASE_URL are marked #[serial].

use larder_common::config::{
    load_toml_config, resolve_root_folder, RootFolder, TomlConfig, API_BASE_URL_ENV_VAR,
    DEFAULT_API_BASE_URL, DEFAULT_SEARCH_DETAIL_LIMIT, ROOT_ENV_VAR,
};
use larder_common::Error;
use serial_test::serial;
use std::path::{Path, PathBuf};

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, TomlConfig::default());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.search_detail_limit, DEFAULT_SEARCH_DETAIL_LIMIT);
    assert_eq!(config.api.request_timeout_secs, None);
}

#[test]
fn test_partial_config_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/larder"

[api]
request_timeout_secs = 20
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/larder")));
    assert_eq!(config.api.request_timeout_secs, Some(20));
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "root_folder = [unterminated").unwrap();

    let err = load_toml_config(&path).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
#[serial]
fn test_cli_argument_wins() {
    std::env::set_var(ROOT_ENV_VAR, "/from/env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    let root = resolve_root_folder(Some(Path::new("/from/cli")), &config);
    assert_eq!(root, PathBuf::from("/from/cli"));

    std::env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn test_env_beats_toml() {
    std::env::set_var(ROOT_ENV_VAR, "/from/env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &config), PathBuf::from("/from/env"));

    std::env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn test_toml_then_default() {
    std::env::remove_var(ROOT_ENV_VAR);
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/from/toml")),
        ..Default::default()
    };
    assert_eq!(resolve_root_folder(None, &config), PathBuf::from("/from/toml"));

    let fallback = resolve_root_folder(None, &TomlConfig::default());
    assert!(fallback.ends_with("larder") || fallback.ends_with("larder_data"));
}

#[test]
#[serial]
fn test_api_base_url_env_override() {
    let config = TomlConfig::default();

    std::env::remove_var(API_BASE_URL_ENV_VAR);
    assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);

    std::env::set_var(API_BASE_URL_ENV_VAR, "http://127.0.0.1:9999/api/");
    assert_eq!(config.api_base_url(), "http://127.0.0.1:9999/api");

    std::env::remove_var(API_BASE_URL_ENV_VAR);
}

#[test]
fn test_root_folder_layout() {
    let dir = tempfile::tempdir().unwrap();
    let root = RootFolder::new(dir.path().join("nested").join("larder"));

    root.ensure_directory_exists().unwrap();
    assert!(root.path().is_dir());
    assert_eq!(root.database_path(), root.path().join("larder.db"));
    assert_eq!(root.session_path(), root.path().join("session"));
}

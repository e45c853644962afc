//! Tests for layered settings loading from a local config directory

use std::fs;

use tempfile::TempDir;

use glosstree::application::ApplicationError;
use glosstree::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "route_base = \"/catalog/glossary\"\nsearch_index = \"terms_index\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(temp.path())).unwrap();

    // Assert
    assert_eq!(settings.route_base, "/catalog/glossary");
    assert_eq!(settings.search_index, "terms_index");
    assert_eq!(settings.routes().base, "/catalog/glossary");
}

#[test]
fn given_data_file_with_tilde_when_loading_then_expanded() {
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "data_file = \"~/exports/terms.json\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    let data_file = settings.data_file.expect("data_file set");
    assert!(!data_file.to_string_lossy().starts_with('~'));
    assert!(data_file.ends_with("exports/terms.json"));
}

#[test]
fn given_malformed_local_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "page_size = [not toml").unwrap();

    let err = Settings::load(Some(temp.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".glosstree.toml"));
}

#[test]
fn given_settings_when_rendering_toml_then_parses_back() {
    let settings = Settings {
        page_size: 200,
        root_label: "Terms".into(),
        ..Default::default()
    };

    let rendered = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&rendered).unwrap();

    assert_eq!(parsed, settings);
}

//! Integration tests for Settings loading and registry seeding.
//!
//! These tests only use explicit config files in temp directories; a global
//! config on the test machine would be layered underneath and overridden.

use std::fs;

use tempfile::TempDir;

use restlist::application::ApplicationError;
use restlist::config::Settings;
use restlist::domain::{DomainError, Restaurant};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("restlist.toml");
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_explicit_config_with_lists_when_load_then_replaces_default_lists() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
select = 1

[[lists]]
name = "Lunch"
restaurants = [{ name = "Cactus", rating = 4.5 }, { name = "Starbucks" }]

[[lists]]
name = "Dinner"
"#,
    );

    // Act
    let settings = Settings::load(Some(path.as_path())).expect("load settings");
    let registry = settings.build_registry().expect("build registry");

    // Assert
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.selected_index(), Some(1));
    let lunch = registry.get(0).unwrap();
    assert_eq!(lunch.name(), "Lunch");
    let names: Vec<&str> = lunch.iter().map(Restaurant::name).collect();
    assert_eq!(names, vec!["Cactus", "Starbucks"]);
    assert_eq!(lunch.get(0).unwrap().rating().unwrap().value(), 4.5);
    assert!(registry.get(1).unwrap().is_empty());
}

#[test]
fn given_config_without_lists_when_load_then_keeps_inherited_lists() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "select = 0\n");

    let settings = Settings::load(Some(path.as_path())).expect("load settings");

    assert_eq!(settings.select, Some(0));
    assert!(!settings.lists.is_empty());
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "lists = [[[\n");

    let err = Settings::load(Some(path.as_path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_duplicate_seed_restaurant_when_building_then_skipped() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[[lists]]
name = "La1"
restaurants = [{ name = "Cactus" }, { name = "Cactus", rating = 1.0 }]
"#,
    );

    let registry = Settings::load(Some(path.as_path()))
        .unwrap()
        .build_registry()
        .unwrap();

    assert_eq!(registry.get(0).unwrap().len(), 1);
    assert_eq!(registry.get(0).unwrap().get(0).unwrap().rating(), None);
}

#[test]
fn given_empty_list_name_when_building_then_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[[lists]]\nname = \"\"\n");

    let err = Settings::load(Some(path.as_path()))
        .unwrap()
        .build_registry()
        .unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::Validation { .. })
    ));
}

#[test]
fn given_selection_past_end_when_building_then_index_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "select = 3\n[[lists]]\nname = \"Only\"\n");

    let err = Settings::load(Some(path.as_path()))
        .unwrap()
        .build_registry()
        .unwrap_err();

    assert_eq!(
        err,
        ApplicationError::Domain(DomainError::IndexOutOfRange { index: 3, len: 1 })
    );
}

#[test]
fn given_template_when_parsed_then_is_valid_toml() {
    let template = Settings::template();
    let parsed: Settings = toml::from_str(&template).expect("template parses");
    assert_eq!(parsed, Settings::default());
}

use std::fs;

use postalcode::PostalCodeManager;
use postalcode::config::{Config, ConfigError, ValidationError};
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("postalcode.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

#[test]
fn test_manager_from_config_file() {
    let (_dir, path) = write_config(
        r#"
[logging]
level = "debug"

[handlers.XA]
builtin = "GB"

[handlers.XB]
pattern = "[A-Z]{2}[0-9]{3}"
hint = "AANNN"
prefix = "XB"
separator = ":"

[handlers.DE]
pattern = "[0-9]{4}"
hint = "NNNN"
split_tail = 2
        "#,
    );

    let config = Config::load_from_path(path).unwrap();
    let manager = PostalCodeManager::from_config(&config);

    assert_eq!(manager.format("wc2e9rz", "xa").unwrap(), "WC2E 9RZ");
    assert_eq!(manager.format("xb123", "XB").unwrap(), "XB:123");
    assert_eq!(manager.format("1234", "DE").unwrap(), "12 34");
    assert!(!manager.validate("10115", "DE").unwrap());
    assert_eq!(manager.format("75008", "FR").unwrap(), "75008");
}

#[test]
fn test_unknown_builtin_alias_is_unsupported_not_an_error() {
    let (_dir, path) = write_config(
        r#"
[handlers.XA]
builtin = "QQ"
        "#,
    );

    let config = Config::load_from_path(path).unwrap();
    let manager = PostalCodeManager::from_config(&config);

    assert!(!manager.is_supported_country("XA"));
}

#[test]
fn test_conflicting_layout_is_rejected() {
    let (_dir, path) = write_config(
        r#"
[handlers.XA]
pattern = "[0-9]{4}"
hint = "NNNN"
split_at = 2
split_tail = 2
        "#,
    );

    let result = Config::load_from_path(path);

    assert!(matches!(
        result,
        Err(ConfigError::ValidationError(ValidationError::ConflictingLayout { .. }))
    ));
}

#[test]
fn test_missing_file_yields_builtins_only() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from_path(temp_dir.path().join("absent.toml")).unwrap();
    let manager = PostalCodeManager::from_config(&config);

    assert!(config.handlers.is_empty());
    assert!(manager.is_supported_country("GB"));
}

use crate::conf::{ConfigError, discover, resolve_glob};

use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn discover_finds_matching_files() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.log"), "").unwrap();
    fs::write(root.join("b.log"), "").unwrap();
    fs::write(root.join("c.txt"), "").unwrap();

    // Act
    let result = discover(root, "*.log").unwrap();

    // Assert
    assert_eq!(result, vec![root.join("a.log"), root.join("b.log")]);
}

#[test]
fn discover_returns_sorted_paths() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("shop_20240302T0000Z_b.log"), "").unwrap();
    fs::write(root.join("shop_20240301T0000Z_a.log"), "").unwrap();
    fs::write(root.join("shop_20240301T0005Z_c.log"), "").unwrap();

    // Act
    let result = discover(root, "*.log").unwrap();

    // Assert
    assert_eq!(
        result,
        vec![
            root.join("shop_20240301T0000Z_a.log"),
            root.join("shop_20240301T0005Z_c.log"),
            root.join("shop_20240302T0000Z_b.log"),
        ]
    );
}

#[test]
fn discover_supports_recursive_globs() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("2024/03")).unwrap();
    fs::write(root.join("root.log"), "").unwrap();
    fs::write(root.join("2024/a.log"), "").unwrap();
    fs::write(root.join("2024/03/b.log"), "").unwrap();

    // Act
    let result = discover(root, "**/*.log").unwrap();

    // Assert
    assert_eq!(
        result,
        vec![
            root.join("2024/03/b.log"),
            root.join("2024/a.log"),
            root.join("root.log"),
        ]
    );
}

#[test]
fn discover_returns_empty_vec_when_no_matches() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.txt"), "").unwrap();

    // Act
    let result = discover(root, "*.log").unwrap();

    // Assert
    assert!(result.is_empty());
}

#[test]
fn discover_filters_out_directories() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    fs::create_dir(root.join("archive.log")).unwrap();

    // Act
    let result = discover(root, "*.log").unwrap();

    // Assert
    assert!(result.is_empty());
}

#[test]
fn discover_returns_error_for_invalid_glob() {
    // Arrange
    let dir = tempdir().unwrap();
    let root = dir.path();

    // Act
    let err = discover(root, "[").unwrap_err();

    // Assert
    match err {
        ConfigError::Glob { pattern, .. } => {
            assert!(pattern.contains('['));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn resolve_glob_joins_root_and_pattern() {
    // Arrange
    let root = Path::new("/var/log/elb");

    // Act
    let resolved = resolve_glob(root, "*.log");

    // Assert
    assert_eq!(resolved, "/var/log/elb/*.log");
}

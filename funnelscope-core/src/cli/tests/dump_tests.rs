use crate::cli::conf::{ConfigCmd, dump, run};
use std::fs;
use tempfile::tempdir;

const CONFIG: &str = r#"
input {
  dir = "logs"
}
"#;

#[test]
fn dump_defaults_to_json() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("funnelscope.hcl");
    fs::write(&path, CONFIG).unwrap();

    // Act
    let result = dump(path, false);

    // Assert
    assert!(result.is_ok());
}

#[test]
fn dump_json_flag_is_accepted() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("funnelscope.hcl");
    fs::write(&path, CONFIG).unwrap();

    // Act
    let result = run(ConfigCmd::Dump {
        path,
        json: true,
        yaml: false,
    });

    // Assert
    assert!(result.is_ok());
}

#[test]
fn dump_reports_invalid_config() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("funnelscope.hcl");
    fs::write(&path, "scan {\n  jobs = 0\n}\n").unwrap();

    // Act
    let result = dump(path, true);

    // Assert
    assert!(result.is_err());
}

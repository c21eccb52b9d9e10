use crate::conf::types::{DEFAULT_LOG_DIR, DEFAULT_PATTERN, DEFAULT_PROGRESS_EVERY};
use crate::conf::{
    AnalyzerConfig, ConfigError, ConfigOverrides, ReportFormat, load_config, parse_config,
    validate_config,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn parse(src: &str) -> Result<AnalyzerConfig, ConfigError> {
    parse_config(src, Path::new("funnelscope.hcl"))
}

//-------------------------------------------------------------------------
// Parsing
//-------------------------------------------------------------------------

#[test]
fn empty_file_yields_defaults() {
    // Act
    let config = parse("").unwrap();

    // Assert
    assert_eq!(config.input.dir, PathBuf::from(DEFAULT_LOG_DIR));
    assert_eq!(config.input.pattern, DEFAULT_PATTERN);
    assert_eq!(config.output.file, None);
    assert_eq!(config.output.format, ReportFormat::Text);
    assert_eq!(config.scan.jobs, 1);
    assert_eq!(config.scan.progress_every, DEFAULT_PROGRESS_EVERY);
}

#[test]
fn all_blocks_are_read() {
    // Arrange
    let src = r#"
input {
  dir     = "/var/log/elb"
  pattern = "**/*.log"
}

output {
  file   = "checkout-report.json"
  format = "json"
}

scan {
  jobs           = 4
  progress_every = 250
}
"#;

    // Act
    let config = parse(src).unwrap();

    // Assert
    assert_eq!(config.input.dir, PathBuf::from("/var/log/elb"));
    assert_eq!(config.input.pattern, "**/*.log");
    assert_eq!(
        config.output.file,
        Some(PathBuf::from("checkout-report.json"))
    );
    assert_eq!(config.output.format, ReportFormat::Json);
    assert_eq!(config.scan.jobs, 4);
    assert_eq!(config.scan.progress_every, 250);
}

#[test]
fn partial_block_keeps_other_defaults() {
    // Act
    let config = parse(r#"input { pattern = "*.txt" }"#).unwrap();

    // Assert
    assert_eq!(config.input.dir, PathBuf::from(DEFAULT_LOG_DIR));
    assert_eq!(config.input.pattern, "*.txt");
}

#[test]
fn unknown_fields_are_rejected() {
    // Act
    let err = parse(r#"input { directory = "logs" }"#).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unknown_format_is_rejected() {
    // Act
    let err = parse(r#"output { format = "xml" }"#).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

//-------------------------------------------------------------------------
// Validation
//-------------------------------------------------------------------------

#[test]
fn zero_jobs_is_invalid() {
    // Arrange
    let mut config = AnalyzerConfig::default();
    config.scan.jobs = 0;

    // Act
    let err = validate_config(&config).unwrap_err();

    // Assert
    match err {
        ConfigError::Invalid { field, .. } => assert_eq!(field, "scan.jobs"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn blank_pattern_is_invalid() {
    // Arrange
    let mut config = AnalyzerConfig::default();
    config.input.pattern = "  ".to_string();

    // Act / Assert
    assert!(validate_config(&config).is_err());
}

#[test]
fn load_config_validates() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("funnelscope.hcl");
    fs::write(&path, "scan { progress_every = 0 }").unwrap();

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "scan.progress_every",
            ..
        }
    ));
}

#[test]
fn load_config_reports_missing_file() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.hcl");

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    match err {
        ConfigError::ReadFile { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {:?}", other),
    }
}

//-------------------------------------------------------------------------
// Overrides
//-------------------------------------------------------------------------

#[test]
fn overrides_take_precedence_over_file_values() {
    // Arrange
    let config = parse(
        r#"
input  { dir = "from-file" }
output { format = "json" }
scan   { jobs = 2 }
"#,
    )
    .unwrap();
    let overrides = ConfigOverrides {
        dir: Some(PathBuf::from("from-cli")),
        jobs: Some(8),
        ..ConfigOverrides::default()
    };

    // Act
    let config = config.with_overrides(overrides);

    // Assert
    assert_eq!(config.input.dir, PathBuf::from("from-cli"));
    assert_eq!(config.input.pattern, DEFAULT_PATTERN);
    assert_eq!(config.output.format, ReportFormat::Json);
    assert_eq!(config.scan.jobs, 8);
}

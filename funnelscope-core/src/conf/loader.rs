use crate::conf::error::ConfigError;
use crate::conf::types::{AnalyzerConfig, CONFIG_FILE_NAME};
use std::fs;
use std::path::Path;

/// Reads, parses and validates one HCL config file.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let src = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let config = parse_config(&src, path)?;
    validate_config(&config)?;

    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Loads `path` when given. Otherwise loads `funnelscope.hcl` from the
/// working directory if present, and falls back to defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AnalyzerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let implicit = Path::new(CONFIG_FILE_NAME);
            if implicit.is_file() {
                load_config(implicit)
            } else {
                Ok(AnalyzerConfig::default())
            }
        }
    }
}

/// `path` only labels errors.
pub fn parse_config(src: &str, path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    hcl::from_str(src).map_err(|e| ConfigError::parse(path, e))
}

pub fn validate_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    if config.input.pattern.trim().is_empty() {
        return Err(ConfigError::invalid("input.pattern", "must not be empty"));
    }
    if config.scan.jobs == 0 {
        return Err(ConfigError::invalid("scan.jobs", "must be at least 1"));
    }
    if config.scan.progress_every == 0 {
        return Err(ConfigError::invalid(
            "scan.progress_every",
            "must be at least 1",
        ));
    }
    Ok(())
}

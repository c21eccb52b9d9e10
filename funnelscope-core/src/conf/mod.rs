mod discover;
mod error;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;

pub use discover::{discover, resolve_glob};
pub use error::ConfigError;
pub use loader::{load_config, load_config_or_default, parse_config, validate_config};
pub use types::{AnalyzerConfig, ConfigOverrides, ReportFormat};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "funnelscope.hcl";
pub const DEFAULT_LOG_DIR: &str = "elb-logs";
pub const DEFAULT_PATTERN: &str = "*.log";
pub const DEFAULT_PROGRESS_EVERY: usize = 1000;

/// Resolved analyzer settings.
///
/// Every block and field is optional in the file:
///
/// ```hcl
/// input  { dir = "elb-logs"  pattern = "*.log" }
/// output { file = "report.txt"  format = "text" }
/// scan   { jobs = 1  progress_every = 1000 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Directory holding the access log files.
    pub dir: PathBuf,
    /// Glob, relative to `dir`.
    pub pattern: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_LOG_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// The report is also written here, truncating the file first.
    pub file: Option<PathBuf>,
    pub format: ReportFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker threads. Files are split into this many contiguous chunks.
    pub jobs: usize,
    /// Log progress every this many files.
    pub progress_every: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            jobs: 1,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub dir: Option<PathBuf>,
    pub pattern: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<ReportFormat>,
    pub jobs: Option<usize>,
}

impl AnalyzerConfig {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.dir {
            self.input.dir = dir;
        }
        if let Some(pattern) = overrides.pattern {
            self.input.pattern = pattern;
        }
        if let Some(file) = overrides.output {
            self.output.file = Some(file);
        }
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(jobs) = overrides.jobs {
            self.scan.jobs = jobs;
        }
        self
    }
}

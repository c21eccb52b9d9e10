use crate::conf::{
    AnalyzerConfig, ConfigOverrides, ReportFormat, load_config_or_default, validate_config,
};
use crate::report::{Report, ReportMeta, render};
use crate::scan::{ScanError, ScanOptions, date_range_of, find_log_files, scan_files};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Directory containing the access log files [default: elb-logs]
    pub log_dir: Option<PathBuf>,

    /// Glob for log files, relative to the log directory [default: *.log]
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Also write the report to this file (truncated first)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Number of worker threads
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Path to an HCL config file [default: ./funnelscope.hcl if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl AnalyzeArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            dir: self.log_dir.clone(),
            pattern: self.pattern.clone(),
            output: self.output.clone(),
            format: self.format,
            jobs: self.jobs,
        }
    }
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = load_config_or_default(args.config.as_deref())?.with_overrides(args.overrides());
    validate_config(&config)?;

    // Truncate up front so a failed run does not leave a stale report behind.
    let mut output = config
        .output
        .file
        .as_deref()
        .map(create_output)
        .transpose()?;

    let report = analyze(&config)?;
    let rendered = render(&report, config.output.format)?;

    print!("{rendered}");
    if config.output.format == ReportFormat::Json {
        println!();
    }

    if let (Some(file), Some(path)) = (output.as_mut(), config.output.file.as_deref()) {
        file.write_all(rendered.as_bytes())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}

/// Discovers, scans and aggregates the configured log files.
pub fn analyze(config: &AnalyzerConfig) -> Result<Report, ScanError> {
    let files = find_log_files(&config.input.dir, &config.input.pattern)?;

    let options = ScanOptions {
        jobs: config.scan.jobs,
        progress_every: config.scan.progress_every,
    };
    let outcome = scan_files(&files, &options)?;

    let meta = ReportMeta {
        generated_at: Utc::now(),
        log_dir: config.input.dir.clone(),
        output_file: config.output.file.clone(),
        scan: outcome.stats,
        date_range: date_range_of(&files),
    };

    Ok(Report::assemble(&outcome.state, meta))
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("failed to create {}", path.display()))
}

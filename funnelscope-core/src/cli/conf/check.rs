use crate::conf::{ConfigError, ReportFormat, load_config};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    let cfg = match load_config(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{}: {}", "hint".yellow().bold(), hint);
            }
            return Err(err.into());
        }
    };

    let ok = "✔".green();
    println!("{ok} Config loaded successfully");
    println!(
        "{ok} input: {}",
        cfg.input.dir.join(&cfg.input.pattern).display()
    );
    match &cfg.output.file {
        Some(file) => println!(
            "{ok} output: {} report to stdout and {}",
            format_name(cfg.output.format),
            file.display()
        ),
        None => println!(
            "{ok} output: {} report to stdout",
            format_name(cfg.output.format)
        ),
    }
    println!(
        "{ok} scan: {} jobs, progress every {} files",
        cfg.scan.jobs, cfg.scan.progress_every
    );

    if !cfg.input.dir.is_dir() {
        println!(
            "{}: log directory {} does not exist yet",
            "warning".yellow().bold(),
            cfg.input.dir.display()
        );
    }

    Ok(())
}

fn format_name(format: ReportFormat) -> &'static str {
    match format {
        ReportFormat::Text => "text",
        ReportFormat::Json => "json",
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => {
            Some("Run `funnelscope config init` to write a starter funnelscope.hcl.")
        }
        ConfigError::Parse { .. } => Some(
            "Recognized blocks are `input`, `output` and `scan`.\n\
             \n\
             Example:\n\
             \n\
             input  { dir = \"elb-logs\"  pattern = \"*.log\" }\n\
             output { format = \"json\" }\n\
             scan   { jobs = 4 }",
        ),
        ConfigError::Invalid { field, .. } if field.starts_with("scan.") => {
            Some("Scan settings are counts and must be at least 1.")
        }
        _ => None,
    }
}

use crate::conf::types::CONFIG_FILE_NAME;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub fn init(dir: PathBuf) -> Result<()> {
    let path = write_starter_config(&dir)?;

    println!("✔ Wrote {}", path.display());
    println!();
    println!("Next steps:");
    println!("  funnelscope config check {}", path.display());
    println!("  funnelscope analyze --config {}", path.display());

    Ok(())
}

/// Writes `funnelscope.hcl` into `dir`, refusing to overwrite.
pub fn write_starter_config(dir: &Path) -> Result<PathBuf> {
    if dir.is_file() {
        bail!("{} exists and is not a directory", dir.display());
    }

    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    fs::write(&path, STARTER_CONFIG.trim_start())
        .with_context(|| format!("failed to create {}", path.display()))?;

    Ok(path)
}

pub const STARTER_CONFIG: &str = r#"
# Where the access logs live. `pattern` is a glob relative to `dir`.
input {
  dir     = "elb-logs"
  pattern = "*.log"
}

# `format` is "text" or "json". Uncomment `file` to keep a copy on disk.
output {
  format = "text"
  # file = "checkout-report.txt"
}

# `jobs` > 1 scans contiguous chunks of files on separate threads.
scan {
  jobs           = 1
  progress_every = 1000
}
"#;

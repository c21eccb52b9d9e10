use crate::conf::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("log directory '{0}' does not exist")]
    MissingDirectory(PathBuf),

    #[error("no log files matching '{pattern}' in '{dir}'")]
    NoLogFiles { dir: PathBuf, pattern: String },

    #[error(transparent)]
    Discovery(#[from] ConfigError),

    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scan worker panicked")]
    WorkerPanicked,
}

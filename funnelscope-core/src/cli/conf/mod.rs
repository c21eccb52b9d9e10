mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a config file and exit
    Check {
        /// Path to the config file
        #[arg(default_value = "funnelscope.hcl")]
        path: PathBuf,
    },

    /// Print the resolved configuration
    Dump {
        #[arg(default_value = "funnelscope.hcl")]
        path: PathBuf,

        /// Output as JSON (default)
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Write a commented starter config file
    Init {
        /// Directory to write funnelscope.hcl into
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path, yaml, .. } => dump(path, yaml),
        ConfigCmd::Init { dir } => init(dir),
    }
}

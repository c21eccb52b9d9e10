use clap::{Parser, Subcommand};
use funnelscope_core::cli;
use funnelscope_core::cli::analyze::{AnalyzeArgs, run_analyze};
use funnelscope_core::logging::init_logging;


#[derive(Parser, Debug)]
#[command(
    name = "funnelscope",
    version,
    about = "Funnelscope: checkout error analysis for load balancer access logs",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Used when no subcommand is given
    #[command(flatten)]
    analyze: AnalyzeArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a directory of access logs (default)
    Analyze(AnalyzeArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },
}

impl Cli {
    fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Analyze(self.analyze))
    }
}

fn main() {
    let command = Cli::parse().into_command();
    init_logging();

    tracing::debug!(?command, "dispatching");

    let result = match command {
        Command::Analyze(args) => run_analyze(args),
        Command::Config { cmd } => cli::conf::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

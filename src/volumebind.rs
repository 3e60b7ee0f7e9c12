use crate::errors::VolumeBindError;
use crate::filter_cmd::{Filter, FilterArgs};
use clap::{Parser, Subcommand};
use env_logger::Env;

#[derive(Debug, Parser)]
#[command(name = "volumebind")]
#[command(about = "Check which nodes can satisfy a pod's persistent volume claims", long_about = None, arg_required_else_help = true, version)]
pub struct Cli {
    #[arg(short, long, global = true, long_help = "Log debug output to stderr.")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(long_about = "Run the scheduler filters for a pod against a set of nodes")]
    Filter(FilterArgs),
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    // tests may have set up a logger already
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init();
}

/// Returns whether at least one node was feasible.
pub async fn volumebind_with_args(args: Cli) -> Result<bool, VolumeBindError> {
    init_logging(args.verbose);
    match args.command {
        Commands::Filter(args) => {
            let filter = Filter {};
            let output = filter.filter(args).await?;
            println!("{}", output.rendered);
            Ok(output.any_feasible())
        }
    }
}

pub async fn volumebind() -> Result<bool, VolumeBindError> {
    let args = Cli::parse();
    volumebind_with_args(args).await
}

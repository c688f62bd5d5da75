use anyhow::Result;
use clap::Parser;
use goldfish::cli::commands::{Cli, execute};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { LevelFilter::INFO } else { LevelFilter::WARN };
    let filter =
        EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli)
}

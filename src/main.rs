//! CLI entry point for porous-microstructure characterization

use clap::Parser;
use porestat::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> porestat::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}

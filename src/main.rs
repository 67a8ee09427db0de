//! CLI entry point for measuring spatial relationships in segmented images

use clap::Parser;
use histospatial::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> histospatial::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()
}

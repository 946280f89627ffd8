//! msa2gfa CLI
//!
//! Converts multiple sequence alignments into GFA or vg JSON graphs.

use clap::Parser;
use msa2gfa::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("msa2gfa=debug,info")
        } else {
            EnvFilter::new("msa2gfa=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

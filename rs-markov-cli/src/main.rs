//! rs-markov - n-gram author fingerprinting from the command line
//!
//! Analyses a directory of per-author texts, then attributes an unknown
//! document, generates text or prints ranked n-grams.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
	let cli = cli::Cli::parse();

	// Initialize logging, RUST_LOG takes precedence over -v
	let default_level = if cli.verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(filter)
		.init();

	cli::run(cli)
}

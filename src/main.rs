//! codename - Generate code name lists from configured profiles
//!
//! codename provides:
//! - Profile-driven code name generation with a bounded retry budget
//! - A persistent, content-addressed cache for fetched sources
//! - Configuration drift detection with an advisory warning

use clap::Parser;
use std::process::ExitCode;

mod cache;
mod cli;
mod config;
mod core;
mod error;
mod generator;
mod logging;
mod pipeline;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet, cli.no_color) {
        eprintln!("Warning: {:#}", e);
    }

    ExitCode::from(cli::run(cli))
}

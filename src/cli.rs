//! CLI module - Command-line interface definitions and handlers

use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::PipelineError;
use crate::pipeline::{self, Notice, Notifier, RunOptions};

/// codename - generate code name lists from configured profiles.
#[derive(Parser, Debug)]
#[command(name = "codename")]
#[command(
    author,
    version,
    about,
    long_about = r#"Generate a list of code names from the sources of a profile.

Profiles are defined in <CONFIG_PATH>/config.json. Fetched sources are
memoized in the cache directory named by the configuration; when the
configuration version changes, run with --clear-cache to drop stale entries.

Exit codes:
  0  success
  1  configuration error
  2  cache error
  3  generation error

Examples:
    codename --count 5 --sort
    codename -p animals --list-all
    codename --list-profiles
    codename --clear-cache -q
"#
)]
pub struct Cli {
    /// Path to the configuration directory.
    #[arg(
        long,
        env = "CODENAME_CONFIG_PATH",
        default_value = "config",
        value_name = "DIR",
        long_help = "Path to the configuration directory containing config.json.\n\n\
Relative source and cache paths in the configuration resolve against it."
    )]
    pub config_path: PathBuf,

    /// Profile to generate from.
    #[arg(short, long, default_value = "main", value_name = "NAME")]
    pub profile: String,

    /// Number of code names to generate.
    #[arg(short, long, default_value = "10", value_name = "N")]
    pub count: usize,

    /// Maximum number of tries for generating each valid code name.
    #[arg(
        long,
        default_value = "64",
        value_name = "N",
        long_help = "Maximum number of draws spent on each code name.\n\n\
If no valid, unused name is found within the budget, generation fails with exit code 3."
    )]
    pub try_count: usize,

    /// Sort the generated list.
    #[arg(short, long)]
    pub sort: bool,

    /// List all code names of the profile (list profiles only).
    #[arg(long)]
    pub list_all: bool,

    /// List available profiles and exit.
    #[arg(long)]
    pub list_profiles: bool,

    /// Clear the cache and exit.
    #[arg(long)]
    pub clear_cache: bool,

    /// Do not print additional messages (useful in scripts).
    #[arg(
        short,
        long,
        long_help = "Suppress advisory and status messages such as the configuration-change\n\
warning. Code names are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (repeat for more diagnostics).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            config_path: cli.config_path.clone(),
            profile: cli.profile.clone(),
            count: cli.count,
            try_count: cli.try_count,
            sort: cli.sort,
            list_all: cli.list_all,
            list_profiles: cli.list_profiles,
            clear_cache: cli.clear_cache,
            quiet: cli.quiet,
        }
    }
}

/// Prints notices to stderr
///
/// Notices go to stderr rather than stdout so stdout carries only names.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::ConfigChanged { cached, current } => eprintln!(
                "{}",
                format!(
                    "The configuration has changed ({} -> {}). Please run the program with the \
                     --clear-cache flag to clear the cache.",
                    cached, current
                )
                .yellow()
            ),
            Notice::CacheCleared => eprintln!("{}", "The cache has been cleared.".green()),
        }
    }
}

/// Run the CLI with parsed arguments, returning the process exit code
pub fn run(cli: Cli) -> u8 {
    let use_color = !cli.no_color && std::io::stderr().is_terminal();
    colored::control::set_override(use_color);

    let options = RunOptions::from(&cli);
    match pipeline::run(&options, &mut TerminalNotifier) {
        Ok(outcome) => {
            for line in outcome.lines() {
                println!("{}", line);
            }
            0
        }
        Err(err) => {
            match &err {
                PipelineError::Storage(storage) => {
                    tracing::debug!(kind = ?storage.kind(), error = ?err, "cache operation failed")
                }
                _ => tracing::debug!(error = ?err, "pipeline failed"),
            }
            eprintln!("{}", err.to_string().red());
            if let Some(cause) = err.cause() {
                eprintln!("{}", cause);
            }
            err.exit_code()
        }
    }
}
